//! Inbound RPC surface.

pub mod commands;
pub mod server;

pub use server::RpcServer;
