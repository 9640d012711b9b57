//! Declarative endpoint descriptions.
//!
//! # Design
//! An endpoint says *what* to request (path, method, query, body); turning
//! it into bytes on the wire is `FetchClient`'s job. Endpoint families are
//! closed enums implementing `Endpoint`; `EndpointDescriptor` is the
//! free-form value type for one-off requests and tests.

use serde::Serialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::http::HttpMethod;

/// One logical API operation.
pub trait Endpoint: Send + Sync {
    /// Path appended verbatim to the client's base URL.
    fn path(&self) -> &str;

    fn method(&self) -> HttpMethod;

    /// Query pairs in order. Only applied to GET requests.
    fn query_items(&self) -> &[(String, String)] {
        &[]
    }

    /// JSON payload. Only applied to POST requests.
    fn json_body(&self) -> Option<Value> {
        None
    }
}

/// Immutable value describing one request.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDescriptor {
    path: String,
    method: HttpMethod,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl EndpointDescriptor {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Get)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Post)
    }

    fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::EncodeFailure`] if `payload` cannot be
    /// represented as JSON (e.g. a map with non-string keys).
    pub fn with_json_body<B: Serialize + ?Sized>(mut self, payload: &B) -> Result<Self, FetchError> {
        let value =
            serde_json::to_value(payload).map_err(|e| FetchError::EncodeFailure(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

impl Endpoint for EndpointDescriptor {
    fn path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> HttpMethod {
        self.method
    }

    fn query_items(&self) -> &[(String, String)] {
        &self.query
    }

    fn json_body(&self) -> Option<Value> {
        self.body.clone()
    }
}

/// Endpoints of the user feed API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEndpoint {
    GetUsers,
    GetVisitors,
}

impl Endpoint for UserEndpoint {
    fn path(&self) -> &str {
        match self {
            UserEndpoint::GetUsers => "downapp/sample/main/sample.json",
            UserEndpoint::GetVisitors => "downapp/visitors",
        }
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }
}
