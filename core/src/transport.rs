//! The network boundary.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and hands back the raw
//! `HttpResponse`. Everything protocol-level (connections, TLS, redirects,
//! chunked decoding) belongs to the implementation. `UreqTransport` is the
//! default and builds a fresh agent per exchange so per-request timeouts never
//! leak between calls. Status codes are returned as data, never as errors.

use std::io::Read;
use std::time::Duration;

use ureq::typestate::{WithBody, WithoutBody};
use ureq::Body;

use crate::error::Error;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a single exchange, blocking until the response head arrives.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let agent = agent_for(&request);
        let headers = outgoing_headers(&request);
        let url = request.url.as_str();
        // An empty payload is sent as no body at all.
        let payload = request.body.as_deref().filter(|bytes| !bytes.is_empty());

        let response = match &request.method {
            HttpMethod::Get => send_without_body(with_headers(agent.get(url), &headers), payload),
            HttpMethod::Delete => send_without_body(with_headers(agent.delete(url), &headers), payload),
            HttpMethod::Head => send_without_body(with_headers(agent.head(url), &headers), payload),
            HttpMethod::Options => send_without_body(with_headers(agent.options(url), &headers), payload),
            HttpMethod::Trace => send_without_body(with_headers(agent.trace(url), &headers), payload),
            HttpMethod::Post => send_with_body(with_headers(agent.post(url), &headers), payload),
            HttpMethod::Put => send_with_body(with_headers(agent.put(url), &headers), payload),
            HttpMethod::Patch => send_with_body(with_headers(agent.patch(url), &headers), payload),
            HttpMethod::Custom(token) => return run_custom(&agent, token, url, &headers, payload),
        }?;

        Ok(into_http_response(response))
    }
}

/// The read timeout bounds the wait for the response head only. ureq's body
/// timeout is a deadline for the whole body, so it is left unset and a body
/// that keeps arriving is never cut off.
fn agent_for(request: &HttpRequest) -> ureq::Agent {
    let mut config = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .allow_non_standard_methods(true);
    if let Some(timeout) = bounded(request.connect_timeout) {
        config = config.timeout_connect(Some(timeout));
    }
    if let Some(timeout) = bounded(request.read_timeout) {
        config = config.timeout_recv_response(Some(timeout));
    }
    config.build().new_agent()
}

/// A zero duration means "no timeout", not "fail immediately".
fn bounded(timeout: Option<Duration>) -> Option<Duration> {
    timeout.filter(|t| !t.is_zero())
}

/// Caller headers plus the no-cache hint when caching is disallowed.
fn outgoing_headers(request: &HttpRequest) -> Vec<(String, String)> {
    let mut headers = request.headers.clone();
    let has_cache_control = headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("cache-control"));
    if !request.use_cache && !has_cache_control {
        headers.push(("Cache-Control".to_string(), "no-cache".to_string()));
    }
    headers
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        log::trace!("header {name}: {value}");
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_without_body(
    builder: ureq::RequestBuilder<WithoutBody>,
    payload: Option<&[u8]>,
) -> Result<ureq::http::Response<Body>, ureq::Error> {
    match payload {
        Some(bytes) => builder.force_send_body().send(bytes),
        None => builder.call(),
    }
}

fn send_with_body(
    builder: ureq::RequestBuilder<WithBody>,
    payload: Option<&[u8]>,
) -> Result<ureq::http::Response<Body>, ureq::Error> {
    match payload {
        Some(bytes) => builder.send(bytes),
        None => builder.send_empty(),
    }
}

fn run_custom(
    agent: &ureq::Agent,
    token: &str,
    url: &str,
    headers: &[(String, String)],
    payload: Option<&[u8]>,
) -> Result<HttpResponse, Error> {
    let mut builder = ureq::http::Request::builder().method(token).uri(url);
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let response = match payload {
        Some(bytes) => {
            let request = builder.body(bytes).map_err(|e| Error::Transport(Box::new(e)))?;
            agent.run(request)?
        }
        None => {
            let request = builder.body(()).map_err(|e| Error::Transport(Box::new(e)))?;
            agent.run(request)?
        }
    };
    Ok(into_http_response(response))
}

fn into_http_response(response: ureq::http::Response<Body>) -> HttpResponse {
    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body: Box<dyn Read> = Box::new(response.into_body().into_reader());

    HttpResponse {
        status: status.as_u16(),
        message: status.canonical_reason().unwrap_or_default().to_string(),
        headers,
        body,
    }
}
