//! Executes immutable `Request` values.
//!
//! # Design
//! `Connector` holds its defaults (`ConnectorConfig`) and a `Transport`. The
//! lowering step (`exchange`) is pure and carries all of the mapping rules:
//!
//! 1. The configured User-Agent goes in first, then the caller's headers, so
//!    a caller-supplied `User-Agent` key replaces it.
//! 2. Non-empty properties become the payload, else the body, else "".
//! 3. Output is always enabled, even for GET with nothing to send.
//! 4. Timeouts come from the request, else from the configuration.
//!
//! No retries: one `connect` is exactly one transport exchange.

use crate::config::ConnectorConfig;
use crate::description::{self, RequestDescription};
use crate::error::Error;
use crate::http::{HttpMethod, HttpRequest};
use crate::request::Request;
use crate::response::Response;
use crate::transport::{Transport, UreqTransport};
use crate::types::ParamMap;

#[derive(Debug, Clone)]
pub struct Connector<T = UreqTransport> {
    config: ConnectorConfig,
    transport: T,
}

impl Connector<UreqTransport> {
    pub fn new() -> Self {
        Self::with_config(ConnectorConfig::default())
    }

    pub fn with_config(config: ConnectorConfig) -> Self {
        Self::with_transport(config, UreqTransport)
    }
}

impl Default for Connector<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Connector<T> {
    pub fn with_transport(config: ConnectorConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Lower `request` into the exchange handed to the transport.
    pub fn exchange(&self, request: &Request) -> HttpRequest {
        let mut headers = ParamMap::from([("User-Agent", self.config.user_agent.as_str())]);
        headers.extend(request.headers().iter());

        HttpRequest {
            method: request.method().clone(),
            url: request.url().to_string(),
            headers: headers.to_pairs(),
            body: Some(request.effective_body().into_owned().into_bytes()),
            connect_timeout: Some(request.connect_timeout().unwrap_or_else(|| self.config.connect_timeout())),
            read_timeout: Some(request.read_timeout().unwrap_or_else(|| self.config.read_timeout())),
            use_cache: true,
        }
    }

    pub fn connect(&self, request: Request) -> Result<Response, Error> {
        log::debug!("connecting {}", description::summary(&request));
        let raw = self.transport.execute(self.exchange(&request))?;
        log::debug!("{} {} -> {} {}", request.method(), request.url(), raw.status, raw.message);
        Ok(Response::new(Some(request), raw))
    }

    pub fn connect_url(&self, url: impl Into<String>) -> Result<Response, Error> {
        self.connect(Request::new(url))
    }

    pub fn connect_method(&self, url: impl Into<String>, method: impl Into<HttpMethod>) -> Result<Response, Error> {
        self.connect(Request::with_method(url, method))
    }

    pub fn connect_properties(
        &self,
        url: impl Into<String>,
        method: impl Into<HttpMethod>,
        properties: ParamMap,
    ) -> Result<Response, Error> {
        self.connect(Request::from_parts(url, method, ParamMap::new(), properties))
    }

    pub fn connect_full(
        &self,
        url: impl Into<String>,
        method: impl Into<HttpMethod>,
        properties: ParamMap,
        headers: ParamMap,
    ) -> Result<Response, Error> {
        self.connect(Request::from_parts(url, method, headers, properties))
    }
}
