//! HTTP exchange types handed to and returned from a `Transport`.
//!
//! # Design
//! These types describe a single exchange as plain data. `Connector` and
//! `RequestBuilder` lower their request models into an `HttpRequest`; the
//! transport performs the network I/O and hands back an `HttpResponse`. Keeping
//! the boundary as data lets the lowering rules be tested without a socket.

use std::fmt;
use std::io::Read;
use std::time::Duration;

/// HTTP method for a request.
///
/// Any string converts into a method. Exact uppercase tokens map to the named
/// variants; everything else is kept verbatim in `Custom` and left for the
/// transport to accept or reject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Trace,
    Custom(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Custom(token) => token,
        }
    }
}

impl From<&str> for HttpMethod {
    fn from(token: &str) -> Self {
        match token {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "HEAD" => HttpMethod::Head,
            "OPTIONS" => HttpMethod::Options,
            "PATCH" => HttpMethod::Patch,
            "TRACE" => HttpMethod::Trace,
            other => HttpMethod::Custom(other.to_string()),
        }
    }
}

impl From<String> for HttpMethod {
    fn from(token: String) -> Self {
        HttpMethod::from(token.as_str())
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-resolved outgoing exchange.
///
/// `body` distinguishes "output disabled" (`None`) from "output enabled with
/// an empty payload" (`Some` of an empty vec). A `None` timeout leaves the
/// transport's own default in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
    pub use_cache: bool,
}

/// The raw result of one exchange as reported by the transport.
///
/// `headers` holds one entry per received value, in wire order, so a
/// multi-valued header appears several times. `body` can be read once.
pub struct HttpResponse {
    pub status: u16,
    pub message: String,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read>,
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("message", &self.message)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
