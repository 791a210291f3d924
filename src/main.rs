//! UPS monitor entry point: CLI dispatch, signal handlers, async runtime.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};

use ups_monitor::app::cli::Args;
use ups_monitor::app::logging::{init_tracing, level_filter, reload_level};
use ups_monitor::config::persistence::{default_config_path, load_config, save_config};
use ups_monitor::notify::TracingSink;
use ups_monitor::rpc::RpcServer;
use ups_monitor::system::executor::SnmpgetExecutor;
use ups_monitor::ups::registry::build_fleet;
use ups_monitor::ups::UpsMonitor;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Priority: 1. --log-level flag, 2. LOG_LEVEL env, 3. config file, 4. default (info)
    let explicit_level = args
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok());

    let filter = match explicit_level.as_deref() {
        Some(level) => level_filter(level).unwrap_or_else(|| {
            eprintln!("Invalid log level '{}'. Using INFO. Valid levels: TRACE, DEBUG, INFO, WARN, ERROR, CRITICAL", level);
            "info"
        }),
        None => "info",
    };
    init_tracing(filter);

    let config = load_config(args.config.as_deref()).await?;

    if explicit_level.is_none() {
        if let Err(e) = reload_level(&config.agent.log_level) {
            warn!("Ignoring configured log level: {}", e);
        }
    }

    if args.show_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.init_config {
        let path = match args.config.clone() {
            Some(p) => p,
            None => default_config_path()?,
        };
        save_config(&config, &path).await?;
        return Ok(());
    }

    let fleet = build_fleet(&config.devices).context("Invalid UPS device table")?;
    let timeout = config.snmp.timeout()?;
    for device in &fleet {
        info!("UPS '{}' at {} ({} parameters)", device.name(), device.identifier(), device.parameters().len());
    }

    let monitor = Arc::new(UpsMonitor::new(
        config.agent.service_name.clone(),
        fleet,
        Arc::new(SnmpgetExecutor::new(config.snmp.clone())),
        Arc::new(TracingSink),
        timeout,
    ));

    // One-shot mode
    if args.once {
        let snapshot = monitor.last_measurement().await;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        if snapshot.is_none() {
            std::process::exit(1);
        }
        return Ok(());
    }

    info!("UPS monitor v{} starting as '{}'", env!("CARGO_PKG_VERSION"), config.agent.service_name);

    let listen_addr = args.listen.clone().unwrap_or_else(|| config.rpc.listen_addr.clone());
    let listener = RpcServer::bind(&listen_addr).await?;
    let server = RpcServer::new(Arc::clone(&monitor));

    // SIGHUP re-reads the config file and applies its log level
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sighup = signal(SignalKind::hangup()).context("Failed to setup SIGHUP handler")?;
        let config_path = args.config.clone();

        tokio::spawn(async move {
            loop {
                sighup.recv().await;
                info!("SIGHUP received, reloading log level configuration");

                match load_config(config_path.as_deref()).await {
                    Ok(new_config) => match reload_level(&new_config.agent.log_level) {
                        Ok(_) => info!("Log level reloaded: {}", new_config.agent.log_level.to_uppercase()),
                        Err(e) => error!("Failed to reload log level: {}", e),
                    },
                    Err(e) => error!("Failed to reload config: {}", e),
                }
            }
        });
    }

    tokio::select! {
        result = server.run(listener) => {
            if let Err(e) = result {
                error!("RPC server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received (Ctrl+C)");
        }
    }

    info!("UPS monitor shutdown complete");
    Ok(())
}
