//! In-memory cache of remote resources keyed by exact URL.
//!
//! # Design
//! Entries are written once and never evicted or replaced, so a reader can
//! never observe a half-updated value and concurrent loads of different
//! URLs share nothing but the map. Fetching the same URL from two places at
//! once may hit the network twice; the first stored body wins.

use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::Transport;

/// Shared URL-to-bytes cache. Clones share the same table.
#[derive(Clone)]
pub struct ResourceCache {
    entries: Arc<DashMap<String, Bytes>>,
    transport: Arc<dyn Transport>,
}

impl ResourceCache {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            transport,
        }
    }

    pub fn get(&self, url: &str) -> Option<Bytes> {
        self.entries.get(url).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `bytes` unless `url` already has an entry; returns the stored value.
    pub fn insert(&self, url: &str, bytes: Bytes) -> Bytes {
        self.entries
            .entry(url.to_string())
            .or_insert(bytes)
            .value()
            .clone()
    }

    /// Return the cached bytes for `url`, fetching and storing them on a miss.
    ///
    /// A hit completes without suspending. On a miss the liveness of
    /// `cancel` is checked after every await; once it has fired the
    /// response is discarded, nothing is stored and `None` is returned.
    pub async fn load(&self, url: &str, cancel: &CancellationToken) -> Option<Result<Bytes, FetchError>> {
        if let Some(bytes) = self.get(url) {
            log::debug!("Resource cache hit: {url}");
            return Some(Ok(bytes));
        }
        if cancel.is_cancelled() {
            return None;
        }

        log::info!("Resource cache miss, fetching: {url}");
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        };
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return None,
            response = self.transport.execute(request) => response,
        };
        if cancel.is_cancelled() {
            log::debug!("Dropping late response for {url}");
            return None;
        }

        let result = response.map_err(FetchError::from).and_then(|response| {
            if !response.is_success() {
                return Err(FetchError::InvalidResponse(response.status));
            }
            if response.body.is_empty() {
                return Err(FetchError::NoData);
            }
            Ok(self.insert(url, response.body))
        });
        Some(result)
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
