use anyhow::{Context, Result};
use std::net::TcpListener;
use std::sync::Arc;

use usersearch_core::ServerConfig;
use usersearch_server::{api::AppState, dataset::Dataset, scenario::ScenarioTable};

mod telemetry;

#[actix_web::main]
async fn main() -> Result<()> {
    let (config, load_error) = load_config("config.json");

    let _guard = telemetry::init_telemetry(&config)?;

    if let Some(e) = load_error {
        tracing::warn!("Failed to load config.json ({:#}), using defaults", e);
    }

    tracing::info!("usersearch-server starting");
    tracing::info!("  Dataset: {}", config.dataset_path);
    tracing::info!("  Port: {}", config.port);
    tracing::info!("  Max limit: {}", config.max_limit);

    let dataset = Dataset::load(&config.dataset_path)?;
    tracing::info!("✓ Dataset loaded ({} users)", dataset.len());

    // Canned failure modes are opt-in so a real deployment only answers real tokens
    let scenarios = if std::env::var_os("USERSEARCH_SCENARIOS").is_some() {
        tracing::warn!("Serving canned failure scenarios");
        ScenarioTable::standard()
    } else {
        ScenarioTable::new()
    };

    let max_limit = usize::try_from(config.max_limit).context("max_limit must be >= 0")?;
    let state = AppState::new(Arc::new(dataset), config.access_token.clone())
        .with_scenarios(scenarios)
        .with_max_limit(max_limit);

    let bind_addr = config.bind_addr();
    let listener =
        TcpListener::bind(&bind_addr).with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("🚀 Starting HTTP server on {}", bind_addr);

    usersearch_server::serve(listener, state)?.await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Load the server config, falling back to defaults.
/// The load error is handed back so it can be logged once tracing is up.
fn load_config(path: &str) -> (ServerConfig, Option<anyhow::Error>) {
    match ServerConfig::load(path) {
        Ok(config) => (config, None),
        Err(e) => (ServerConfig::default(), Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_falls_back_to_defaults() {
        let (config, err) = load_config("/nonexistent/config.json");
        assert_eq!(config.port, "8080");
        assert!(err.unwrap().to_string().contains("failed to read server config"));
    }

    #[test]
    fn test_load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port":"9191","log_dir":""}}"#).unwrap();

        let (config, err) = load_config(file.path().to_str().unwrap());
        assert!(err.is_none());
        assert_eq!(config.port, "9191");
        assert!(config.log_dir.is_empty());
    }
}
