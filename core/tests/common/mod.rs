//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use swipe_core::{HttpRequest, HttpResponse, ReportEvent, Reporter, Transport, TransportError};
use tokio::sync::{Notify, Semaphore};

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// Transport answering from a closure, optionally held until released.
pub struct ScriptedTransport {
    respond: Box<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
    calls: AtomicUsize,
    gate: Option<Semaphore>,
    entered: Notify,
}

impl ScriptedTransport {
    pub fn new(
        respond: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
            entered: Notify::new(),
        }
    }

    /// Every response is held until `release` is called once per request.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    /// Always answers `status` with `body`.
    pub fn fixed(status: u16, body: &'static [u8]) -> Self {
        Self::new(move |_| Ok(HttpResponse::new(status, body)))
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Resolves once a request has reached the transport.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().last().cloned().expect("no request recorded")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());
        self.entered.notify_one();
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        (self.respond)(&request)
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().clone()
    }

    pub fn contexts(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.context.clone()).collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: ReportEvent) {
        self.events.lock().push(event);
    }
}

pub fn shared(transport: ScriptedTransport) -> Arc<ScriptedTransport> {
    Arc::new(transport)
}
