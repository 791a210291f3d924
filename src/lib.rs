//! UPS telemetry daemon: polls UPS units over SNMP and republishes the latest
//! complete snapshot to RPC callers.

pub mod app;
pub mod config;
pub mod notify;
pub mod rpc;
pub mod system;
pub mod ups;
