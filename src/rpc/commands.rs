//! RPC command handling: dispatches incoming JSON envelopes to the monitor.

use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::ups::monitor::UpsMonitor;

/// Handle one text frame and build the reply, if any.
/// Envelope: `{"type": "command", "data": {"type": "lastMeasurement", "commandId": "..."}}`
pub(crate) async fn handle_message(monitor: &UpsMonitor, text: &str) -> Result<Option<Value>> {
    let message: Value = serde_json::from_str(text)?;

    let msg_type = message
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing or invalid message type"))?;

    match msg_type {
        "command" => {
            let data = message
                .get("data")
                .ok_or_else(|| anyhow::anyhow!("Missing command data"))?;
            handle_command(monitor, data).await.map(Some)
        }
        "ping" => Ok(Some(json!({
            "type": "pong",
            "service": monitor.service_name(),
            "connected": monitor.is_connected(),
            "timestamp": chrono::Utc::now().timestamp_millis()
        }))),
        _ => {
            debug!("Ignoring message type: {}", msg_type);
            Ok(None)
        }
    }
}

async fn handle_command(monitor: &UpsMonitor, data: &Value) -> Result<Value> {
    let command_type = data
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing or invalid command type"))?;

    let command_id = data
        .get("commandId")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing command ID"))?;

    debug!("Processing command: {} ({})", command_type, command_id);

    let (success, error_msg, result_data) = match command_type {
        // Absence of data is the failure signal; polling errors never become RPC errors
        "lastMeasurement" => match monitor.last_measurement().await {
            Some(snapshot) => (true, None, serde_json::to_value(&snapshot)?),
            None => (true, None, Value::Null),
        },
        "listParameters" => {
            let devices: Vec<Value> = monitor
                .devices()
                .iter()
                .map(|d| {
                    json!({
                        "name": d.name(),
                        "host": d.identifier(),
                        "parameters": d.parameters(),
                    })
                })
                .collect();
            (true, None, json!({ "devices": devices }))
        }
        _ => {
            warn!("Unknown command: {}", command_type);
            (false, Some(format!("Unknown command: {}", command_type)), Value::Null)
        }
    };

    let mut response = json!({
        "type": "commandResponse",
        "commandId": command_id,
        "success": success,
        "data": result_data,
        "timestamp": chrono::Utc::now().timestamp_millis()
    });

    if let Some(err) = error_msg {
        response["error"] = Value::String(err);
    }

    Ok(response)
}
