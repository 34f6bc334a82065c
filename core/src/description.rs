//! Capability shared by both request models.
//!
//! `Request` (copy-on-write value) and `RequestBuilder` (mutable, chaining)
//! keep different mutability contracts, so they do not share a type. Both
//! describe the same things, which is what this trait exposes.

use std::borrow::Cow;

use crate::http::HttpMethod;
use crate::types::ParamMap;

pub trait RequestDescription {
    fn url(&self) -> &str;

    fn method(&self) -> &HttpMethod;

    /// Headers as the caller supplied them.
    fn headers(&self) -> &ParamMap;

    /// Text this request model puts on the wire, if it has any.
    fn payload(&self) -> Option<Cow<'_, str>>;
}

/// Short one-line summary used in log output.
pub(crate) fn summary(request: &impl RequestDescription) -> String {
    let payload_len = request.payload().map_or(0, |p| p.len());
    format!(
        "{} {} ({} headers, {payload_len} byte payload)",
        request.method(),
        request.url(),
        request.headers().len()
    )
}
