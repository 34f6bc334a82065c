//! Immutable request value.
//!
//! # Design
//! Every `add_*` / `with_*` method returns a new `Request` and leaves the
//! receiver untouched. Fields not named by the call (body, timeouts, the
//! other map) are carried into the new value.

use std::borrow::Cow;
use std::time::Duration;

use crate::description::RequestDescription;
use crate::http::HttpMethod;
use crate::types::ParamMap;

/// Description of one exchange, executed by `Connector::connect`.
///
/// Non-empty `properties` are serialized as `key=value&...` and take the place
/// of `body`. Unset timeouts fall back to the connector's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    url: String,
    method: HttpMethod,
    headers: ParamMap,
    properties: ParamMap,
    body: Option<String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_method(url, HttpMethod::Get)
    }

    pub fn with_method(url: impl Into<String>, method: impl Into<HttpMethod>) -> Self {
        Self::from_parts(url, method, ParamMap::new(), ParamMap::new())
    }

    pub fn from_parts(
        url: impl Into<String>,
        method: impl Into<HttpMethod>,
        headers: ParamMap,
        properties: ParamMap,
    ) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers,
            properties,
            body: None,
            connect_timeout: None,
            read_timeout: None,
        }
    }

    pub fn properties(&self) -> &ParamMap {
        &self.properties
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    pub fn add_header(&self, key: impl Into<String>, value: impl Into<String>) -> Request {
        let mut headers = self.headers.clone();
        headers.insert(key, value);
        Request { headers, ..self.clone() }
    }

    pub fn add_headers(&self, headers: &ParamMap) -> Request {
        Request {
            headers: self.headers.merged(headers),
            ..self.clone()
        }
    }

    pub fn add_property(&self, key: impl Into<String>, value: impl Into<String>) -> Request {
        let mut properties = self.properties.clone();
        properties.insert(key, value);
        Request { properties, ..self.clone() }
    }

    pub fn add_properties(&self, properties: &ParamMap) -> Request {
        Request {
            properties: self.properties.merged(properties),
            ..self.clone()
        }
    }

    pub fn with_body(&self, body: impl Into<String>) -> Request {
        Request {
            body: Some(body.into()),
            ..self.clone()
        }
    }

    pub fn with_connect_timeout(&self, timeout: Duration) -> Request {
        Request {
            connect_timeout: Some(timeout),
            ..self.clone()
        }
    }

    pub fn with_read_timeout(&self, timeout: Duration) -> Request {
        Request {
            read_timeout: Some(timeout),
            ..self.clone()
        }
    }

    /// Serialized properties if there are any, otherwise the body, otherwise "".
    pub fn effective_body(&self) -> Cow<'_, str> {
        if !self.properties.is_empty() {
            Cow::Owned(self.properties.to_query_string())
        } else {
            Cow::Borrowed(self.body.as_deref().unwrap_or(""))
        }
    }
}

impl RequestDescription for Request {
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
        Some(self.effective_body())
    }
}
