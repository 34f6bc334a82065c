//! Read-only view over a completed exchange.
//!
//! # Design
//! Header lookups match names ASCII case-insensitively, since the transport
//! reports field names lowercased. Missing names and out-of-range indexes
//! yield `None` (or a count of 0), never a panic. The body can be consumed
//! once; a second read sees an exhausted stream.

use std::fmt;
use std::io::Read;

use crate::error::Error;
use crate::http::HttpResponse;
use crate::request::Request;

pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

pub struct Response {
    request: Option<Request>,
    raw: HttpResponse,
    expected_status_code: u16,
}

impl Response {
    /// Wrap a raw result. `request` is the originating `Request` when the
    /// exchange came from `Connector`; builder exchanges have none.
    pub fn new(request: Option<Request>, raw: HttpResponse) -> Self {
        Self {
            request,
            raw,
            expected_status_code: DEFAULT_EXPECTED_STATUS,
        }
    }

    pub fn request(&self) -> Option<&Request> {
        self.request.as_ref()
    }

    pub fn expected_status_code(&self) -> u16 {
        self.expected_status_code
    }

    pub fn set_expected_status_code(&mut self, code: u16) {
        self.expected_status_code = code;
    }

    pub fn with_expected_status_code(mut self, code: u16) -> Self {
        self.expected_status_code = code;
        self
    }

    /// True only when the status equals the expected code exactly.
    pub fn was_successful(&self) -> bool {
        self.raw.status == self.expected_status_code
    }

    pub fn status(&self) -> u16 {
        self.raw.status
    }

    pub fn status_message(&self) -> &str {
        &self.raw.message
    }

    /// All values received for `name`, in wire order.
    fn values(&self, name: &str) -> Vec<&str> {
        self.raw
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// First value of header `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_at(name, 0)
    }

    pub fn header_at(&self, name: &str, index: usize) -> Option<&str> {
        self.values(name).get(index).copied()
    }

    pub fn header_count(&self, name: &str) -> usize {
        self.values(name).len()
    }

    /// Distinct header names in first-appearance order.
    pub fn header_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (name, _) in &self.raw.headers {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name);
            }
        }
        names
    }

    /// Every header with its values grouped under the first-seen spelling.
    pub fn headers(&self) -> Vec<(&str, Vec<&str>)> {
        self.header_names()
            .into_iter()
            .map(|name| (name, self.values(name)))
            .collect()
    }

    /// The raw body stream, for callers that want to read it themselves.
    pub fn body_mut(&mut self) -> &mut dyn Read {
        &mut self.raw.body
    }

    pub fn into_body(self) -> Box<dyn Read> {
        self.raw.body
    }

    /// Read the rest of the body and decode it as UTF-8, replacing invalid
    /// sequences.
    pub fn read_to_string(&mut self) -> Result<String, Error> {
        let mut bytes = Vec::new();
        self.raw.body.read_to_end(&mut bytes)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("request", &self.request)
            .field("raw", &self.raw)
            .field("expected_status_code", &self.expected_status_code)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn response(status: u16, headers: &[(&str, &str)], body: &[u8]) -> Response {
        Response::new(
            None,
            HttpResponse {
                status,
                message: "OK".to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: Box::new(Cursor::new(body.to_vec())),
            },
        )
    }

    #[test]
    fn was_successful_is_exact_match() {
        assert!(response(200, &[], b"").was_successful());
        assert!(!response(201, &[], b"").was_successful());
        assert!(!response(204, &[], b"").was_successful());
    }

    #[test]
    fn expected_status_can_be_changed() {
        let mut created = response(201, &[], b"");
        assert_eq!(created.expected_status_code(), 200);
        created.set_expected_status_code(201);
        assert!(created.was_successful());

        let not_found = response(404, &[], b"").with_expected_status_code(404);
        assert!(not_found.was_successful());
    }

    #[test]
    fn status_passthrough() {
        let resp = response(200, &[], b"");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.status_message(), "OK");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let resp = response(200, &[("content-type", "application/json")], b"");
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.header_count("CONTENT-TYPE"), 1);
    }

    #[test]
    fn multi_valued_headers_by_index() {
        let resp = response(200, &[("x-tag", "a"), ("date", "today"), ("x-tag", "b")], b"");
        assert_eq!(resp.header_at("X-Tag", 0), Some("a"));
        assert_eq!(resp.header_at("X-Tag", 1), Some("b"));
        assert_eq!(resp.header_count("x-tag"), 2);
        assert_eq!(resp.header_names(), vec!["x-tag", "date"]);
        assert_eq!(
            resp.headers(),
            vec![("x-tag", vec!["a", "b"]), ("date", vec!["today"])]
        );
    }

    #[test]
    fn absent_headers_are_none() {
        let resp = response(200, &[("date", "today")], b"");
        assert_eq!(resp.header("x-missing"), None);
        assert_eq!(resp.header_at("x-missing", 0), None);
        assert_eq!(resp.header_at("date", 1), None);
        assert_eq!(resp.header_count("x-missing"), 0);
    }

    #[test]
    fn header_lookup_outlives_name_argument() {
        let resp = response(200, &[("x-request-id", "abc")], b"");
        let value = {
            let name = String::from("X-Request-Id");
            resp.header_at(&name, 0)
        };
        assert_eq!(value, Some("abc"));
    }

    #[test]
    fn body_reads_once() {
        let mut resp = response(200, &[], b"hello");
        assert_eq!(resp.read_to_string().unwrap(), "hello");
        assert_eq!(resp.read_to_string().unwrap(), "");
    }

    #[test]
    fn body_stream_is_raw() {
        let mut resp = response(200, &[], b"stream");
        let mut first = [0u8; 3];
        resp.body_mut().read_exact(&mut first).unwrap();
        assert_eq!(&first, b"str");
        assert_eq!(resp.read_to_string().unwrap(), "eam");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut resp = response(200, &[], &[0x66, 0xff, 0x6f]);
        assert_eq!(resp.read_to_string().unwrap(), "f\u{fffd}o");
    }
}
