use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name prefix inside the log directory
pub const LOG_FILE_NAME: &str = "react-agent.log";

/// Initialize the logging system
/// Logs will be written to `log_dir` only (no console output, the console
/// belongs to the agent trace)
pub fn init_logging(log_dir: &Path) -> Result<()> {
    // Create logs directory if it doesn't exist
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    // File appender - daily rotation in the log directory
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // Default to INFO level, can be overridden with RUST_LOG env var
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::info!("Logging system initialized");
    tracing::info!("Log files location: {}", log_dir.join(LOG_FILE_NAME).display());

    Ok(())
}

/// Check if the log directory exists
pub fn logs_dir_exists(log_dir: &Path) -> bool {
    log_dir.is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let log_dir = tmp.path().join("nested").join("logs");
        assert!(!logs_dir_exists(&log_dir));

        // Another test binary may already own the global subscriber; the
        // directory is created before that matters.
        let _ = init_logging(&log_dir);
        assert!(logs_dir_exists(&log_dir));
    }
}
