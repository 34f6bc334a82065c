//! Error type for the courier client.
//!
//! # Design
//! Transport failures are carried through with their original source rather
//! than classified. An unexpected status code is never an error: callers opt
//! into status checks through `Response::was_successful`.

/// Errors returned by connect and response-reading operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed to complete the exchange (bad URL, DNS, refused
    /// connection, timeout, ...).
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Reading the response body failed.
    #[error("reading response body failed: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}
