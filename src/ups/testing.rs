//! Test doubles for the executor and notification seams.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::notify::{NotificationSink, Severity};
use crate::system::executor::QueryExecutor;
use crate::ups::error::QueryError;

type Call = (String, Vec<String>, Duration);

/// Replays queued responses per device, in order.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: Mutex<HashMap<String, VecDeque<Result<Vec<String>, QueryError>>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, device: &str, response: Result<Vec<String>, QueryError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(device.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn query(
        &self,
        device: &str,
        addresses: &[String],
        timeout: Duration,
    ) -> Result<Vec<String>, QueryError> {
        self.calls
            .lock()
            .unwrap()
            .push((device.to_string(), addresses.to_vec(), timeout));

        self.responses
            .lock()
            .unwrap()
            .get_mut(device)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| {
                Err(QueryError::Unreachable {
                    detail: format!("no scripted response for {}", device),
                })
            })
    }
}

/// Records every notification.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, Severity, String)>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<(String, Severity, String)> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.events().iter().filter(|(_, _, m)| m.contains(needle)).count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, source: &str, severity: Severity, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((source.to_string(), severity, message.to_string()));
    }
}
