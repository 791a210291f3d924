//! snmpget subprocess executor.
//! One batched read per device, bounded by a hard deadline.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::config::types::SnmpSettings;
use crate::ups::error::QueryError;

/// Batched read of OIDs from one device.
/// Implementations must return exactly one line per address, in request order.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn query(
        &self,
        device: &str,
        addresses: &[String],
        timeout: Duration,
    ) -> Result<Vec<String>, QueryError>;
}

/// Runs the net-snmp `snmpget` tool with a fixed community and protocol version.
pub struct SnmpgetExecutor {
    settings: SnmpSettings,
}

impl SnmpgetExecutor {
    pub fn new(settings: SnmpSettings) -> Self {
        Self { settings }
    }
}

/// Build an snmpget Command for one device.
/// `-On` keeps OIDs numeric, `-Oe` drops enum labels, `-r 0` disables tool-side retries.
/// The tool's own `-t` sits past `timeout` so an unresponsive device always hits the daemon deadline first.
pub fn build_snmpget_command(
    settings: &SnmpSettings,
    device: &str,
    addresses: &[String],
    timeout: Duration,
) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(&settings.command);
    let tool_timeout = tool_timeout_secs(timeout).to_string();

    cmd.args(["-v", &settings.version, "-c", &settings.community]);
    cmd.args(["-On", "-Oe", "-t", &tool_timeout, "-r", "0"]);
    cmd.arg(device);
    cmd.args(addresses);
    cmd
}

/// Whole seconds strictly greater than `timeout`.
fn tool_timeout_secs(timeout: Duration) -> u64 {
    timeout.as_secs_f64().ceil() as u64 + 1
}

/// Run a command to completion within `timeout` and return its stdout.
/// The child is killed if the deadline fires.
pub async fn run_bounded(mut cmd: tokio::process::Command, timeout: Duration) -> Result<String, QueryError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let program = cmd.as_std().get_program().to_string_lossy().to_string();
    trace!("Executing: {:?}", cmd.as_std());

    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(result) => result.map_err(|e| QueryError::Unreachable {
            detail: format!("failed to execute {}: {}", program, e),
        })?,
        Err(_) => return Err(QueryError::Timeout(timeout)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr
        };
        return Err(QueryError::Unreachable { detail });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Split tool output into response lines and check there is one per address.
pub fn split_response(stdout: &str, expected: usize) -> Result<Vec<String>, QueryError> {
    let lines: Vec<String> = stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    if lines.len() != expected {
        return Err(QueryError::IncompleteResponse {
            expected,
            received: lines.len(),
        });
    }

    Ok(lines)
}

#[async_trait]
impl QueryExecutor for SnmpgetExecutor {
    async fn query(
        &self,
        device: &str,
        addresses: &[String],
        timeout: Duration,
    ) -> Result<Vec<String>, QueryError> {
        debug!("snmpget {} ({} OIDs)", device, addresses.len());

        let cmd = build_snmpget_command(&self.settings, device, addresses, timeout);
        let stdout = run_bounded(cmd, timeout).await?;
        split_response(&stdout, addresses.len())
    }
}
