//! Error types for the fetch client and resource cache.
//!
//! # Design
//! Every failure is terminal and returned as a typed value. `InvalidRequest`
//! and `EncodeFailure` are raised before any I/O; the rest describe what
//! came back (or failed to come back) from the transport.

use std::fmt;

/// A network-level failure surfaced by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error: {}", self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::new(err.to_string())
    }
}

/// Errors returned by `FetchClient` and `ResourceCache`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The endpoint path is empty or does not form a valid URL.
    InvalidRequest,

    /// The response had no status, or one outside 200..=299.
    InvalidResponse(Option<u16>),

    /// The body is not JSON or does not match the target type.
    DecodeFailure(String),

    /// The POST payload could not be serialized to JSON.
    EncodeFailure(String),

    /// The transport failed before a response arrived.
    Transport(TransportError),

    /// A successful response carried an empty body.
    NoData,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidRequest => write!(f, "invalid request"),
            FetchError::InvalidResponse(Some(status)) => {
                write!(f, "invalid response: HTTP {status}")
            }
            FetchError::InvalidResponse(None) => write!(f, "invalid response: no status"),
            FetchError::DecodeFailure(msg) => write!(f, "decode failed: {msg}"),
            FetchError::EncodeFailure(msg) => write!(f, "encode failed: {msg}"),
            FetchError::Transport(err) => write!(f, "{err}"),
            FetchError::NoData => write!(f, "response carried no data"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        FetchError::Transport(err)
    }
}
