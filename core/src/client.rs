//! Typed JSON-array fetch client.
//!
//! # Design
//! `FetchClient` holds a base URL, a transport and a reporter, and carries
//! no mutable state between calls. As with a host-does-IO client, the
//! pipeline is split into `build_request` (endpoint to `HttpRequest`) and
//! `parse_array` (`HttpResponse` to `Vec<T>`); `fetch_array` joins the two
//! around a cancellable transport call.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::report::{LogReporter, ReportEvent, Reporter};
use crate::transport::Transport;

const REPORT_CONTEXT: &str = "FetchClient";

#[derive(Clone)]
pub struct FetchClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    reporter: Arc<dyn Reporter>,
}

impl FetchClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            reporter: Arc::new(LogReporter),
        }
    }

    pub fn from_config(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self::new(config.base_url.clone(), transport)
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn an endpoint into a request without touching the network.
    ///
    /// Query items are applied only to GET, the JSON body only to POST.
    pub fn build_request<E: Endpoint + ?Sized>(&self, endpoint: &E) -> Result<HttpRequest, FetchError> {
        if endpoint.path().is_empty() {
            return Err(FetchError::InvalidRequest);
        }

        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint.path()))
            .map_err(|_| FetchError::InvalidRequest)?;
        let mut headers = Vec::new();
        let mut body = None;

        match endpoint.method() {
            HttpMethod::Get => {
                let query = endpoint.query_items();
                if !query.is_empty() {
                    url.query_pairs_mut()
                        .clear()
                        .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
                }
            }
            HttpMethod::Post => {
                if let Some(payload) = endpoint.json_body() {
                    let json = serde_json::to_string(&payload)
                        .map_err(|e| FetchError::EncodeFailure(e.to_string()))?;
                    headers.push(("Content-Type".to_string(), "application/json".to_string()));
                    body = Some(json);
                }
            }
        }

        Ok(HttpRequest {
            method: endpoint.method(),
            url: url.into(),
            headers,
            body,
        })
    }

    /// Validate the status and decode the body as a JSON array of `T`.
    ///
    /// All-or-nothing: one bad element fails the whole array.
    pub fn parse_array<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Vec<T>, FetchError> {
        if !response.is_success() {
            return Err(FetchError::InvalidResponse(response.status));
        }
        serde_json::from_slice(&response.body).map_err(|e| FetchError::DecodeFailure(e.to_string()))
    }

    /// Build, execute and decode.
    ///
    /// Returns `None` if `cancel` fires before the response is decoded; the
    /// result is then dropped and nothing is reported.
    pub async fn fetch_array<T, E>(
        &self,
        endpoint: &E,
        cancel: &CancellationToken,
    ) -> Option<Result<Vec<T>, FetchError>>
    where
        T: DeserializeOwned,
        E: Endpoint + ?Sized,
    {
        let request = match self.build_request(endpoint) {
            Ok(request) => request,
            Err(err) => return Some(Err(err)),
        };

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("fetch of {} cancelled", endpoint.path());
                return None;
            }
            response = self.transport.execute(request) => response,
        };
        if cancel.is_cancelled() {
            return None;
        }

        let result = response
            .map_err(FetchError::from)
            .and_then(|response| self.parse_array(response));
        match &result {
            Ok(items) => log::debug!("fetched {} items from {}", items.len(), endpoint.path()),
            Err(err) => self.reporter.report(ReportEvent::now(
                REPORT_CONTEXT,
                format!("{}: {err}", endpoint.path()),
            )),
        }
        Some(result)
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
