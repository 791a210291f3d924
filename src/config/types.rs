//! Agent configuration structs and defaults.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ups::registry::default_devices;
use crate::ups::types::ParameterDescriptor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub agent: AgentSettings,
    #[serde(default)]
    pub snmp: SnmpSettings,
    #[serde(default)]
    pub rpc: RpcSettings,
    #[serde(default = "default_devices")]
    pub devices: Vec<DeviceConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Well-known name the daemon is registered under
    pub service_name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnmpSettings {
    pub command: String,      // path to snmpget
    pub version: String,      // "2c"
    pub community: String,    // read-only community
    pub timeout_secs: f64,    // hard deadline per device query
}

impl Default for SnmpSettings {
    fn default() -> Self {
        Self {
            command: "snmpget".to_string(),
            version: "2c".to_string(),
            community: "public".to_string(),
            timeout_secs: 2.0,
        }
    }
}

impl SnmpSettings {
    /// Per-device query deadline. Rejects zero, negative, NaN and out-of-range values.
    pub fn timeout(&self) -> Result<Duration> {
        let timeout = Duration::try_from_secs_f64(self.timeout_secs)
            .with_context(|| format!("Invalid snmp.timeout_secs: {}", self.timeout_secs))?;
        if timeout.is_zero() {
            bail!("Invalid snmp.timeout_secs: must be greater than zero");
        }
        Ok(timeout)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcSettings {
    pub listen_addr: String,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3150".to_string(),
        }
    }
}

/// One UPS entry of the device table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub name: String,
    pub host: String,
    pub parameters: Vec<ParameterDescriptor>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent: AgentSettings {
                service_name: "ups-monitor".to_string(),
                log_level: "INFO".to_string(),
            },
            snmp: SnmpSettings::default(),
            rpc: RpcSettings::default(),
            devices: default_devices(),
        }
    }
}
