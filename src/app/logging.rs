//! Tracing subscriber setup, custom formatter, dynamic log level reload.

use tracing_subscriber::{reload, EnvFilter};

// Global reload handle for dynamic log level changes
pub type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;
pub static RELOAD_HANDLE: std::sync::OnceLock<ReloadHandle> = std::sync::OnceLock::new();

// Custom event formatter for logs: "YYYY-MM-DD HH:MM:SS [LEVEL] message"
pub struct CustomEventFormat;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for CustomEventFormat
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        write!(writer, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;

        let level = event.metadata().level();
        if writer.has_ansi_escapes() {
            let level_color = match *level {
                tracing::Level::TRACE => "\x1b[2m",  // Dim/gray
                tracing::Level::DEBUG => "\x1b[34m", // Blue
                tracing::Level::INFO => "\x1b[32m",  // Green
                tracing::Level::WARN => "\x1b[33m",  // Yellow
                tracing::Level::ERROR => "\x1b[31m", // Red
            };
            write!(writer, "{}[{}]\x1b[0m ", level_color, level)?;
        } else {
            write!(writer, "[{}] ", level)?;
        }

        // Message and fields (source, device, parameter, ...)
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Map a user-supplied level name to an EnvFilter directive.
/// CRITICAL is accepted as an alias for ERROR.
pub fn level_filter(level: &str) -> Option<&'static str> {
    match level.to_lowercase().as_str() {
        "critical" | "error" => Some("error"),
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        _ => None,
    }
}

/// Initialize the tracing subscriber with reload capability.
pub fn init_tracing(filter: &str) {
    use tracing_subscriber::prelude::*;

    let env_filter = EnvFilter::new(filter);
    let (filter_layer, reload_handle) = reload::Layer::new(env_filter);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
                .with_writer(std::io::stderr)
                .fmt_fields(tracing_subscriber::fmt::format::DefaultFields::new())
                .event_format(CustomEventFormat)
        )
        .init();

    let _ = RELOAD_HANDLE.set(reload_handle);
}

/// Swap the active filter at runtime (used on SIGHUP).
pub fn reload_level(level: &str) -> anyhow::Result<()> {
    let filter = level_filter(level)
        .ok_or_else(|| anyhow::anyhow!("Invalid log level '{}'", level))?;
    let handle = RELOAD_HANDLE
        .get()
        .ok_or_else(|| anyhow::anyhow!("Tracing not initialized"))?;
    handle.reload(EnvFilter::new(filter))?;
    Ok(())
}
