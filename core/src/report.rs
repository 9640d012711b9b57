//! Fire-and-forget failure reporting.
//!
//! The client and the image loader hand every non-validation failure to a
//! `Reporter`. Production code forwards to the `log` facade; tests record.

use chrono::{DateTime, SecondsFormat, Utc};

/// A single reported failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEvent {
    pub context: String,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

impl ReportEvent {
    pub fn now(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            detail: detail.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Sink for failure events. Implementations must not panic.
pub trait Reporter: Send + Sync {
    fn report(&self, event: ReportEvent);
}

/// Writes events through `log::error!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, event: ReportEvent) {
        log::error!(
            "[{}] {} at {}",
            event.context,
            event.detail,
            event.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _event: ReportEvent) {}
}
