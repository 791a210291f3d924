//! Command-line argument definitions (clap).

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ups-monitor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "UPS telemetry daemon: polls UPS units over SNMP and serves the latest snapshot", long_about = None)]
pub struct Args {
    /// Path to config.json (defaults to the executable's directory)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Set log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,

    /// Override the RPC listen address (e.g. 0.0.0.0:3150)
    #[arg(short = 'L', long)]
    pub listen: Option<String>,

    /// Poll all UPS units once, print the snapshot and exit
    #[arg(long)]
    pub once: bool,

    /// Print the effective configuration and exit
    #[arg(long = "show-config")]
    pub show_config: bool,

    /// Write the effective configuration to the config path and exit
    #[arg(long = "init-config")]
    pub init_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from(["ups-monitor", "--once", "--log-level", "debug", "-L", "0.0.0.0:9000"]).unwrap();
        assert!(args.once);
        assert!(!args.show_config);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.listen.as_deref(), Some("0.0.0.0:9000"));
        assert!(args.config.is_none());
    }
}
