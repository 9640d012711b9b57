//! Per-call-site image loading on top of `ResourceCache`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::cache::ResourceCache;
use crate::error::FetchError;
use crate::report::{LogReporter, ReportEvent, Reporter};

const REPORT_CONTEXT: &str = "ImageLoader";

/// What a call site currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded(Bytes),
    Failed(FetchError),
}

/// Loads one URL for one consumer (e.g. one visible image view).
///
/// Each loader has its own in-flight flag: a `resolve` issued while another
/// is still running on the same loader is ignored. Different loaders, even
/// for the same URL, never wait on each other.
pub struct ImageLoader {
    url: Option<String>,
    cache: ResourceCache,
    reporter: Arc<dyn Reporter>,
    in_flight: AtomicBool,
    state: Mutex<LoadState>,
}

/// Clears the in-flight flag however `resolve` exits.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ImageLoader {
    pub fn new(url: Option<String>, cache: ResourceCache) -> Self {
        Self {
            url,
            cache,
            reporter: Arc::new(LogReporter),
            in_flight: AtomicBool::new(false),
            state: Mutex::new(LoadState::NotLoaded),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn state(&self) -> LoadState {
        self.state.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Drive the loader towards `Loaded` or `Failed`.
    ///
    /// Returns `None` without touching state when there is no URL, when a
    /// load is already in flight on this loader, or when `cancel` fires
    /// before the outcome is known. Failures are reported and kept as
    /// `LoadState::Failed`; they are not retried.
    pub async fn resolve(&self, cancel: &CancellationToken) -> Option<Result<Bytes, FetchError>> {
        let url = self.url.as_deref()?;
        if cancel.is_cancelled() {
            return None;
        }

        if let Some(bytes) = self.cache.get(url) {
            *self.state.lock() = LoadState::Loaded(bytes.clone());
            return Some(Ok(bytes));
        }

        if self.in_flight.swap(true, Ordering::AcqRel) {
            log::debug!("Load already in flight: {url}");
            return None;
        }
        let _in_flight = InFlight(&self.in_flight);
        *self.state.lock() = LoadState::Loading;

        let outcome = self.cache.load(url, cancel).await?;
        if cancel.is_cancelled() {
            return None;
        }

        let next = match &outcome {
            Ok(bytes) => LoadState::Loaded(bytes.clone()),
            Err(err) => {
                self.reporter
                    .report(ReportEvent::now(REPORT_CONTEXT, format!("{url}: {err}")));
                LoadState::Failed(err.clone())
            }
        };
        *self.state.lock() = next;
        Some(outcome)
    }
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("url", &self.url)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}
