use tracing_subscriber::{EnvFilter, prelude::*};

use crate::errors::{FileListError, FileListResult};

/// Pick the log filter, `RUST_LOG` taking precedence over the configured level
///
/// A malformed `RUST_LOG` is reported on stderr and ignored, falling back to
/// the configured level; a malformed configured level is an error. Returns
/// `Ok(None)` when no usable filter is set, meaning logging stays off.
fn resolve_filter(
    rust_log: Option<String>,
    log_level: Option<&str>,
) -> FileListResult<Option<EnvFilter>> {
    if let Some(directives) = rust_log {
        match EnvFilter::try_new(&directives) {
            Ok(filter) => return Ok(Some(filter)),
            Err(e) => eprintln!("Ignoring invalid RUST_LOG '{}': {}", directives, e),
        }
    }

    let Some(level) = log_level else {
        return Ok(None);
    };

    EnvFilter::try_new(level)
        .map(Some)
        .map_err(|e| FileListError::LoggingInitialization(format!("{}: {}", level, e)))
}

/// Initialize logging based on environment and CLI configuration
///
/// Logs go to stderr without colors: stdout carries the MCP stdio transport.
///
/// # Environment Variables
/// - `RUST_LOG`: Filter directives (trace, debug, info, warn, error, or per-target)
/// - `LOG_LEVEL`: Fallback level, also settable with `--log-level`
///
/// # Returns
/// - `Ok(())` if logging is successfully initialized or skipped
/// - `Err(FileListError::LoggingInitialization)` if initialization fails
pub fn init_logging(log_level: Option<&str>) -> FileListResult<()> {
    let Some(env_filter) = resolve_filter(std::env::var("RUST_LOG").ok(), log_level)? else {
        return Ok(());
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| FileListError::LoggingInitialization(e.to_string()))?;

    Ok(())
}
