//! Error types for the polling pipeline.

/// Data-shape errors in one SNMP response line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected type tag (wanted {expected}) in line: {line}")]
    UnexpectedTypeTag { expected: &'static str, line: String },

    #[error("malformed number in line: {line}")]
    MalformedNumber { line: String },
}

/// Transport and availability errors from the query executor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("query timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("device unreachable: {detail}")]
    Unreachable { detail: String },

    #[error("incomplete response: expected {expected} lines, received {received}")]
    IncompleteResponse { expected: usize, received: usize },
}

/// Why a single device poll failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("query to {device} failed: {source}")]
    Query {
        device: String,
        #[source]
        source: QueryError,
    },

    #[error("decoding {parameter} from {device} failed: {source}")]
    Decode {
        device: String,
        parameter: String,
        #[source]
        source: DecodeError,
    },
}

impl SampleError {
    pub fn device(&self) -> &str {
        match self {
            SampleError::Query { device, .. } | SampleError::Decode { device, .. } => device,
        }
    }

    pub fn parameter(&self) -> Option<&str> {
        match self {
            SampleError::Query { .. } => None,
            SampleError::Decode { parameter, .. } => Some(parameter),
        }
    }
}

/// Invalid device/parameter table. Only raised at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("duplicate parameter name '{name}' (device {device})")]
    DuplicateParameter { name: String, device: String },

    #[error("device {device} has no parameters")]
    NoParameters { device: String },
}
