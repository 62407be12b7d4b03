//! The stockroom server binary.
//!
//! Startup order: configuration, logging, metrics, store, then the HTTP
//! server with graceful shutdown on SIGTERM/SIGINT.

use std::env;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use stockroom_config::{ConfigError, ConfigLoader, LogFormat, StockroomConfig};
use stockroom_server::{app, AppState, ShutdownSignal};
use stockroom_service::ItemService;
use stockroom_store::ItemStore;
use stockroom_telemetry::logging::{init_logging, LogConfig};
use stockroom_telemetry::metrics::{init_metrics, MetricsConfig};

fn load_config() -> Result<StockroomConfig, ConfigError> {
    let path = env::var("STOCKROOM_CONFIG").unwrap_or_else(|_| "stockroom.toml".to_string());

    ConfigLoader::new()
        .with_dotenv()
        .with_optional_file(path)?
        .with_env_prefix("STOCKROOM")
        .load()
}

fn init_telemetry(config: &StockroomConfig) -> anyhow::Result<()> {
    let logging = &config.telemetry.logging;
    init_logging(&LogConfig {
        enabled: logging.enabled,
        level: logging.level.clone(),
        json_format: logging.format == LogFormat::Json,
        ..LogConfig::default()
    })
    .context("logging initialization failed")?;

    init_metrics(&MetricsConfig {
        enabled: config.telemetry.metrics.enabled,
        ..MetricsConfig::default()
    })
    .context("metrics initialization failed")?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("configuration loading failed")?;
    init_telemetry(&config)?;

    let store = ItemStore::open(&config.database.path)
        .with_context(|| format!("failed to open database at {}", config.database.path))?;
    let service = ItemService::new(store);
    let state = AppState::new(service, &config.telemetry.service_name);

    let listener = tokio::net::TcpListener::bind(&config.server.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.http_addr))?;
    info!(addr = %config.server.http_addr, "stockroom listening");

    let shutdown = ShutdownSignal::with_os_signals();
    let grace = Duration::from_secs(config.server.shutdown_timeout_secs);

    let server = axum::serve(listener, app(state)).with_graceful_shutdown(shutdown.recv());

    tokio::select! {
        result = async { server.await } => {
            result.context("server error")?;
            info!("server stopped");
        }
        () = drain_deadline(&shutdown, grace) => {
            warn!(grace_secs = grace.as_secs(), "graceful shutdown timed out, aborting");
        }
    }

    Ok(())
}

/// Completes once shutdown has been requested and the grace period has
/// fully elapsed.
async fn drain_deadline(shutdown: &ShutdownSignal, grace: Duration) {
    shutdown.recv().await;
    tokio::time::sleep(grace).await;
}
