//! Fluent, mutable request builder.
//!
//! # Design
//! Setters take `&mut self` and return `&mut Self`, so a chain mutates one
//! instance in place. The builder lowers itself into an `HttpRequest` with its
//! own rules, which differ from `Connector` for GET requests with a body:
//! here the body becomes the query string.

use std::borrow::Cow;
use std::time::Duration;

use crate::config::DEFAULT_USER_AGENT;
use crate::description::{self, RequestDescription};
use crate::error::Error;
use crate::http::{HttpMethod, HttpRequest};
use crate::response::Response;
use crate::transport::{Transport, UreqTransport};
use crate::types::ParamMap;

/// Mutable request that can connect itself.
///
/// `timeout` of `None` leaves the transport's default timeouts in place;
/// `Some` applies the same duration to both connect and read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    pub url: String,
    pub method: HttpMethod,
    pub headers: ParamMap,
    pub body: String,
    pub timeout: Option<Duration>,
    pub use_cache: bool,
}

impl RequestBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            headers: ParamMap::from([("User-Agent", DEFAULT_USER_AGENT)]),
            body: String::new(),
            timeout: None,
            use_cache: true,
        }
    }

    pub fn get(&mut self) -> &mut Self {
        self.method = HttpMethod::Get;
        self
    }

    pub fn post(&mut self) -> &mut Self {
        self.method = HttpMethod::Post;
        self
    }

    pub fn put(&mut self) -> &mut Self {
        self.method = HttpMethod::Put;
        self
    }

    pub fn delete(&mut self) -> &mut Self {
        self.method = HttpMethod::Delete;
        self
    }

    pub fn body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = body.into();
        self
    }

    /// Bound both connecting and waiting for the response head.
    /// `Duration::ZERO` means no timeout.
    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Go back to the transport's default timeouts.
    pub fn no_timeout(&mut self) -> &mut Self {
        self.timeout = None;
        self
    }

    /// Set a header, replacing any value already stored under `key`.
    pub fn header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(key, value);
        self
    }

    /// With `false`, the transport sends `Cache-Control: no-cache` unless a
    /// `Cache-Control` header is already set. ureq keeps no local cache, so
    /// this is a request to intermediaries rather than a client-side switch.
    pub fn use_cache(&mut self, use_cache: bool) -> &mut Self {
        self.use_cache = use_cache;
        self
    }

    fn has_blank_body(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Lower into the exchange a transport executes.
    pub fn exchange(&self) -> HttpRequest {
        let is_get = self.method == HttpMethod::Get;
        let url = if is_get && !self.has_blank_body() {
            format!("{}?{}", self.url, self.body)
        } else {
            self.url.clone()
        };

        let output_enabled = matches!(self.method, HttpMethod::Post | HttpMethod::Put)
            || (!self.has_blank_body() && !is_get);
        let body = output_enabled.then(|| {
            if !self.body.is_empty() && !is_get {
                self.body.as_bytes().to_vec()
            } else {
                Vec::new()
            }
        });

        HttpRequest {
            method: self.method.clone(),
            url,
            headers: self.headers.to_pairs(),
            body,
            connect_timeout: self.timeout,
            read_timeout: self.timeout,
            use_cache: self.use_cache,
        }
    }

    /// Execute over the default ureq transport.
    pub fn connect(&self) -> Result<Response, Error> {
        self.connect_with(&UreqTransport::default())
    }

    pub fn connect_with<T: Transport>(&self, transport: &T) -> Result<Response, Error> {
        log::debug!("connecting {}", description::summary(self));
        let raw = transport.execute(self.exchange())?;
        log::debug!("{} {} -> {}", self.method, self.url, raw.status);
        Ok(Response::new(None, raw))
    }
}

impl RequestDescription for RequestBuilder {
    fn url(&self) -> &str {
        &self.url
    }

    fn method(&self) -> &HttpMethod {
        &self.method
    }

    fn headers(&self) -> &ParamMap {
        &self.headers
    }

    fn payload(&self) -> Option<Cow<'_, str>> {
        (!self.body.is_empty()).then(|| Cow::Borrowed(self.body.as_str()))
    }
}
