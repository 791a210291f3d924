use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use ups_monitor::notify::{NotificationSink, Severity};
use ups_monitor::system::executor::QueryExecutor;
use ups_monitor::ups::error::QueryError;
use ups_monitor::ups::registry::{build_fleet, default_devices};
use ups_monitor::ups::types::DecodedValue;
use ups_monitor::ups::UpsMonitor;

/// Every reachable UPS answers the same healthy readings; listed hosts time out.
struct FakeUps {
    down: Mutex<Vec<String>>,
}

#[async_trait]
impl QueryExecutor for FakeUps {
    async fn query(&self, device: &str, addresses: &[String], timeout: Duration) -> Result<Vec<String>, QueryError> {
        if self.down.lock().unwrap().iter().any(|d| d == device) {
            return Err(QueryError::Timeout(timeout));
        }
        let answers = ["INTEGER: 2", "Gauge32: 87", "INTEGER: 1", "Gauge32: 15"];
        Ok(addresses.iter().zip(answers).map(|(oid, a)| format!("{} {}", oid, a)).collect())
    }
}

#[derive(Default)]
struct Log(Mutex<Vec<(Severity, String)>>);

impl NotificationSink for Log {
    fn notify(&self, _source: &str, severity: Severity, message: &str) {
        self.0.lock().unwrap().push((severity, message.to_string()));
    }
}

fn setup() -> (UpsMonitor, Arc<FakeUps>, Arc<Log>) {
    let ups = Arc::new(FakeUps { down: Mutex::new(Vec::new()) });
    let log = Arc::new(Log::default());
    let fleet = build_fleet(&default_devices()).unwrap();
    let monitor = UpsMonitor::new("ups-monitor", fleet, ups.clone(), log.clone(), Duration::from_secs(2));
    (monitor, ups, log)
}

#[tokio::test]
async fn two_healthy_units_produce_full_snapshot() {
    let (monitor, _ups, log) = setup();

    let snapshot = monitor.last_measurement().await.expect("snapshot");
    let json = serde_json::to_value(&snapshot).unwrap();
    let object = json.as_object().unwrap();

    assert_eq!(object.len(), 9);
    assert!(object["date"].as_str().unwrap().ends_with('Z'));
    for name in ["main", "dome"] {
        assert_eq!(object[&format!("{}_status", name)], 2);
        assert_eq!(object[&format!("{}_battery_remaining", name)], 87);
        assert_eq!(object[&format!("{}_battery_healthy", name)], true);
        assert_eq!(object[&format!("{}_output_load", name)], 15);
    }
    assert_eq!(snapshot.values["main_battery_healthy"], DecodedValue::Boolean(true));
    assert!(log.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn outage_and_recovery_are_reported_once() {
    let (monitor, ups, log) = setup();

    ups.down.lock().unwrap().push("ups-dome".to_string());
    for _ in 0..3 {
        assert!(monitor.last_measurement().await.is_none());
    }

    ups.down.lock().unwrap().clear();
    for _ in 0..2 {
        assert!(monitor.last_measurement().await.is_some());
    }

    let events = log.0.lock().unwrap().clone();
    assert_eq!(events.len(), 2);
    assert!(events[0].1.contains("lost"));
    assert!(events[1].1.contains("restored"));
}
