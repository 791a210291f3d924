//! Boundary to the net-snmp command-line tools.

pub mod executor;
pub mod parser;
