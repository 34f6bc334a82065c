//! Small blocking HTTP convenience layer.
//!
//! # Overview
//! Describe a request, execute it, inspect the response. Two request models
//! are offered side by side:
//!
//! - `Request` is an immutable value; `add_*` / `with_*` return new values.
//!   It is executed by `Connector::connect`, which always enables output and
//!   sends properties or body as the payload.
//! - `RequestBuilder` is mutable and chains with `&mut Self`. Its `connect`
//!   turns the body of a GET into the query string instead.
//!
//! Both produce a `Response` exposing status, headers and a read-once body.
//!
//! # Design
//! - The network lives behind `Transport`; `UreqTransport` is the default.
//! - Defaults (User-Agent, timeouts) are `ConnectorConfig` values, not globals.
//! - Nothing retries and nothing is cancellable; each call is one exchange.

pub mod builder;
pub mod config;
pub mod connector;
pub mod description;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use builder::RequestBuilder;
pub use config::ConnectorConfig;
pub use connector::Connector;
pub use description::RequestDescription;
pub use error::Error;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use request::Request;
pub use response::Response;
pub use transport::{Transport, UreqTransport};
pub use types::ParamMap;
