//! UPS monitor: fleet-wide polling, snapshot assembly, and connectivity tracking.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::notify::{NotificationSink, Severity};
use crate::system::executor::QueryExecutor;
use super::error::SampleError;
use super::sampler;
use super::types::{DecodedValue, DeviceDescriptor, Snapshot};

pub const CONNECTION_LOST: &str = "Connection to UPS lost";
pub const CONNECTION_RESTORED: &str = "Connection to UPS restored";

/// Outcome of the previous poll. Starts healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityState {
    pub last_query_succeeded: bool,
}

impl Default for ConnectivityState {
    fn default() -> Self {
        Self {
            last_query_succeeded: true,
        }
    }
}

pub struct UpsMonitor {
    service_name: String,
    devices: Vec<DeviceDescriptor>,
    executor: Arc<dyn QueryExecutor>,
    sink: Arc<dyn NotificationSink>,
    timeout: Duration,
    // Held for a whole poll so concurrent callers cannot interleave edge transitions
    connectivity: Mutex<ConnectivityState>,
    // Readable while a poll holds the lock
    connected: AtomicBool,
}

impl UpsMonitor {
    pub fn new(
        service_name: impl Into<String>,
        devices: Vec<DeviceDescriptor>,
        executor: Arc<dyn QueryExecutor>,
        sink: Arc<dyn NotificationSink>,
        timeout: Duration,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            devices,
            executor,
            sink,
            timeout,
            connectivity: Mutex::new(ConnectivityState::default()),
            connected: AtomicBool::new(ConnectivityState::default().last_query_succeeded),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn devices(&self) -> &[DeviceDescriptor] {
        &self.devices
    }

    /// Whether the most recent completed poll succeeded. Never waits on a poll in flight.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Poll every device and return a complete snapshot, or `None` if any device failed.
    /// Failures never escape as errors; they are logged and reported through the sink on state change.
    pub async fn last_measurement(&self) -> Option<Snapshot> {
        let mut state = self.connectivity.lock().await;
        let date = Utc::now();

        match self.poll_all().await {
            Ok(values) => {
                if !state.last_query_succeeded {
                    self.sink.notify(&self.service_name, Severity::Info, CONNECTION_RESTORED);
                    state.last_query_succeeded = true;
                    self.connected.store(true, Ordering::Release);
                }
                debug!("Polled {} values from {} UPS units", values.len(), self.devices.len());
                Some(Snapshot::new(date, values))
            }
            Err(e) => {
                error!(
                    device = e.device(),
                    parameter = e.parameter().unwrap_or("-"),
                    oid = self.failing_oid(&e).unwrap_or("-"),
                    "UPS poll failed: {}",
                    e
                );
                if state.last_query_succeeded {
                    self.sink.notify(&self.service_name, Severity::Info, CONNECTION_LOST);
                    state.last_query_succeeded = false;
                    self.connected.store(false, Ordering::Release);
                }
                None
            }
        }
    }

    fn failing_oid(&self, e: &SampleError) -> Option<&str> {
        let device = self.devices.iter().find(|d| d.identifier() == e.device())?;
        device.parameter(e.parameter()?).map(|p| p.address.as_str())
    }

    /// Sample devices in configuration order; the first failure discards everything.
    async fn poll_all(&self) -> Result<BTreeMap<String, DecodedValue>, SampleError> {
        let mut merged = BTreeMap::new();
        for device in &self.devices {
            let values = sampler::sample(self.executor.as_ref(), device, self.timeout).await?;
            merged.extend(values);
        }
        Ok(merged)
    }
}
