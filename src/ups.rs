//! UPS polling pipeline: descriptors, per-device sampling, and the fleet monitor.

pub mod error;
pub mod monitor;
pub mod registry;
pub mod sampler;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use monitor::UpsMonitor;
