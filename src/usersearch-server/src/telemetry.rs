//! Tracing setup for the reference server
//!
//! Console output always; JSON lines to a rotating file when `log_dir` is set.

use anyhow::{Context, Result};
use rolling_file::{RollingConditionBasic, RollingFileAppender};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use usersearch_core::ServerConfig;

const LOG_FILE_NAME: &str = "usersearch.log";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and is `None` when
/// file logging is disabled.
pub fn init_telemetry(config: &ServerConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .with_context(|| format!("invalid log filter {:?}", config.log_filter))?;

    let Some(path) = log_file_path(&config.log_dir) else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stdout).with_target(false))
            .try_init()?;
        tracing::info!("Telemetry initialized, console only");
        return Ok(None);
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log dir {}", dir.display()))?;
    }

    // Request logs are small; rotate daily or at 5MB and keep 5 files
    let file_appender = RollingFileAppender::new(
        &path,
        RollingConditionBasic::new().daily().max_size(5 * 1024 * 1024),
        5,
    )?;
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_current_span(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stdout).with_target(false))
        .try_init()?;

    tracing::info!(path = %path.display(), "Telemetry initialized with file logging");

    Ok(Some(guard))
}

fn log_file_path(log_dir: &str) -> Option<PathBuf> {
    if log_dir.is_empty() {
        None
    } else {
        Some(Path::new(log_dir).join(LOG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        assert_eq!(log_file_path(""), None);
        assert_eq!(
            log_file_path("./logs"),
            Some(PathBuf::from("./logs/usersearch.log"))
        );
    }
}
