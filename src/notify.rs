//! Notification sink: where connectivity edge events are reported.

use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Fire-and-forget notification target.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, source: &str, severity: Severity, message: &str);
}

/// Forwards notifications into the tracing log.
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, source: &str, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!(source, "{}", message),
            Severity::Error => error!(source, "{}", message),
        }
    }
}
