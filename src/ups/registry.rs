//! Static device/parameter table and fleet construction.
//! OIDs are from the APC PowerNet MIB and are the same on every unit.

use std::collections::HashSet;

use crate::config::types::DeviceConfig;
use super::error::ConfigurationError;
use super::types::{DeviceDescriptor, ParameterDescriptor, ParameterKind};

pub const OID_OUTPUT_STATUS: &str = ".1.3.6.1.4.1.318.1.1.1.4.1.1.0";
pub const OID_BATTERY_CAPACITY: &str = ".1.3.6.1.4.1.318.1.1.1.2.2.1.0";
pub const OID_BATTERY_REPLACE_INDICATOR: &str = ".1.3.6.1.4.1.318.1.1.1.2.2.4.0";
pub const OID_OUTPUT_LOAD: &str = ".1.3.6.1.4.1.318.1.1.1.4.2.3.0";

/// (suffix, OID, kind) for every UPS. Names are prefixed with the device label.
const UPS_PARAMETERS: [(&str, &str, ParameterKind); 4] = [
    ("status", OID_OUTPUT_STATUS, ParameterKind::ReadOnlyInteger),
    ("battery_remaining", OID_BATTERY_CAPACITY, ParameterKind::ReadOnlyGauge),
    ("battery_healthy", OID_BATTERY_REPLACE_INDICATOR, ParameterKind::ReadOnlyBoolean),
    ("output_load", OID_OUTPUT_LOAD, ParameterKind::ReadOnlyGauge),
];

/// (label, host) of the monitored units.
const UPS_UNITS: [(&str, &str); 2] = [
    ("main", "ups-main"),
    ("dome", "ups-dome"),
];

/// Standard parameter set for one UPS, names prefixed with `label`.
pub fn ups_parameters(label: &str) -> Vec<ParameterDescriptor> {
    UPS_PARAMETERS
        .iter()
        .map(|(suffix, oid, kind)| ParameterDescriptor::new(format!("{}_{}", label, suffix), *oid, *kind))
        .collect()
}

/// Default device table used when the config file does not provide one.
pub fn default_devices() -> Vec<DeviceConfig> {
    UPS_UNITS
        .iter()
        .map(|(label, host)| DeviceConfig {
            name: label.to_string(),
            host: host.to_string(),
            parameters: ups_parameters(label),
        })
        .collect()
}

/// Validate the device table and build descriptors in configuration order.
/// Parameter names must be unique across the whole fleet.
pub fn build_fleet(devices: &[DeviceConfig]) -> Result<Vec<DeviceDescriptor>, ConfigurationError> {
    let mut seen = HashSet::new();
    let mut fleet = Vec::with_capacity(devices.len());

    for device in devices {
        let descriptor = DeviceDescriptor::new(&device.name, &device.host, device.parameters.clone())?;
        for parameter in descriptor.parameters() {
            if !seen.insert(parameter.name.clone()) {
                return Err(ConfigurationError::DuplicateParameter {
                    name: parameter.name.clone(),
                    device: device.host.clone(),
                });
            }
        }
        fleet.push(descriptor);
    }

    Ok(fleet)
}
