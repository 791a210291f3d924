//! Per-device polling: one batched query, positional decode, all-or-nothing.

use std::collections::HashMap;
use std::time::Duration;

use tracing::trace;

use crate::system::executor::QueryExecutor;
use crate::system::parser;
use super::error::{QueryError, SampleError};
use super::types::{DecodedValue, DeviceDescriptor};

/// Poll one device and decode every parameter.
/// Lines are matched to parameters by position, so the executor's ordering contract is load-bearing.
pub async fn sample(
    executor: &dyn QueryExecutor,
    device: &DeviceDescriptor,
    timeout: Duration,
) -> Result<HashMap<String, DecodedValue>, SampleError> {
    let addresses = device.addresses();

    let lines = executor
        .query(device.identifier(), &addresses, timeout)
        .await
        .map_err(|source| SampleError::Query {
            device: device.identifier().to_string(),
            source,
        })?;

    if lines.len() != addresses.len() {
        return Err(SampleError::Query {
            device: device.identifier().to_string(),
            source: QueryError::IncompleteResponse {
                expected: addresses.len(),
                received: lines.len(),
            },
        });
    }

    let mut values = HashMap::with_capacity(device.parameters().len());
    for (parameter, line) in device.parameters().iter().zip(lines.iter()) {
        trace!("{} <- {}", parameter.name, line);
        let value = parser::decode(parameter.kind, line).map_err(|source| SampleError::Decode {
            device: device.identifier().to_string(),
            parameter: parameter.name.clone(),
            source,
        })?;
        values.insert(parameter.name.clone(), value);
    }

    Ok(values)
}
