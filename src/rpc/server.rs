//! WebSocket RPC server: accepts local/remote callers and serves `lastMeasurement`.

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::ups::monitor::UpsMonitor;

use super::commands::handle_message;

pub struct RpcServer {
    monitor: Arc<UpsMonitor>,
}

impl RpcServer {
    pub fn new(monitor: Arc<UpsMonitor>) -> Self {
        Self { monitor }
    }

    pub async fn bind(addr: &str) -> Result<TcpListener> {
        TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind RPC listener on {}", addr))
    }

    /// Accept connections until the task is cancelled. One task per client.
    pub async fn run(&self, listener: TcpListener) -> Result<()> {
        let local = listener.local_addr()?;
        info!("Serving '{}' on ws://{}", self.monitor.service_name(), local);

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    let monitor = Arc::clone(&self.monitor);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(monitor, stream, peer).await {
                            warn!("Client {} error: {}", peer, e);
                        }
                    });
                }
                Err(e) => error!("Accept failed: {}", e),
            }
        }
    }
}

async fn handle_connection(monitor: Arc<UpsMonitor>, stream: TcpStream, peer: SocketAddr) -> Result<()> {
    let ws_stream = tokio_tungstenite::accept_async(stream)
        .await
        .context("WebSocket handshake failed")?;

    let client_id = Uuid::new_v4().to_string()[..8].to_string();
    debug!("Client {} connected from {}", client_id, peer);

    let (mut write, mut read) = ws_stream.split();

    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => match handle_message(&monitor, &text).await {
                Ok(Some(reply)) => write.send(Message::Text(reply.to_string())).await?,
                Ok(None) => {}
                Err(e) => warn!("Client {}: rejected message: {}", client_id, e),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("Client {} stream error: {}", client_id, e);
                break;
            }
        }
    }

    debug!("Client {} disconnected", client_id);
    Ok(())
}
