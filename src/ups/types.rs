//! UPS data types: parameter/device descriptors, decoded values, and the Snapshot.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::error::ConfigurationError;

/// How a raw SNMP response line is decoded.
/// The read-only variants are informational; nothing here ever writes to a UPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Boolean,
    ReadOnlyBoolean,
    Integer,
    ReadOnlyInteger,
    ReadOnlyGauge,
}

impl ParameterKind {
    /// Type tag the query tool must emit for this kind.
    pub fn expected_tag(self) -> &'static str {
        match self {
            ParameterKind::ReadOnlyGauge => "Gauge32:",
            _ => "INTEGER:",
        }
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, ParameterKind::Boolean | ParameterKind::ReadOnlyBoolean)
    }
}

/// One monitored quantity on a UPS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "oid")]
    pub address: String,
    pub kind: ParameterKind,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, address: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            kind,
        }
    }
}

/// One physical UPS: a network identity plus the ordered parameters polled from it.
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    name: String,
    identifier: String,
    parameters: Vec<ParameterDescriptor>,
    parameters_by_name: HashMap<String, usize>,
}

impl DeviceDescriptor {
    /// Build a device, rejecting empty parameter lists and duplicate names.
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        parameters: Vec<ParameterDescriptor>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let identifier = identifier.into();

        if parameters.is_empty() {
            return Err(ConfigurationError::NoParameters { device: identifier });
        }

        let mut parameters_by_name = HashMap::with_capacity(parameters.len());
        for (index, parameter) in parameters.iter().enumerate() {
            if parameters_by_name.insert(parameter.name.clone(), index).is_some() {
                return Err(ConfigurationError::DuplicateParameter {
                    name: parameter.name.clone(),
                    device: identifier,
                });
            }
        }

        Ok(Self {
            name,
            identifier,
            parameters,
            parameters_by_name,
        })
    }

    /// Label used in diagnostics ("main", "dome").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Network address used to reach the device.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters_by_name.get(name).map(|&i| &self.parameters[i])
    }

    /// OIDs in parameter order, as handed to the query executor.
    pub fn addresses(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.address.clone()).collect()
    }
}

/// A decoded SNMP value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecodedValue {
    Boolean(bool),
    Integer(i64),
}

/// Date format of [`Snapshot::date`]: UTC, second precision.
pub const SNAPSHOT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One complete poll cycle across the whole fleet.
/// Serializes flat: `{"date": "...", "main_status": 2, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, DecodedValue>,
}

impl Snapshot {
    pub fn new(date: chrono::DateTime<chrono::Utc>, values: BTreeMap<String, DecodedValue>) -> Self {
        Self {
            date: date.format(SNAPSHOT_DATE_FORMAT).to_string(),
            values,
        }
    }
}
