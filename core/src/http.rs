//! HTTP request/response types exchanged with a `Transport`.
//!
//! # Design
//! Requests and responses are plain data. `FetchClient` builds an
//! `HttpRequest` and consumes an `HttpResponse`; whatever executes the
//! round-trip in between (a real HTTP stack or a scripted responder in
//! tests) only has to honor the `Transport` contract.

use bytes::Bytes;

/// HTTP method for an endpoint. Only the two verbs the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute (base origin + endpoint path + optional query string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// `status` is `None` when the transport produced a response without an
/// HTTP status line (e.g. a non-HTTP scheme).
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: Option<u16>,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status: Some(status),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// True when the status is present and within 200..=299.
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }
}
