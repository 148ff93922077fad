//! AquaGuard service binary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `AQUAGUARD_*` environment variables
//! 3. Load the classifier model (absence is a valid, degraded state)
//! 4. Build the feature source (live HTTP or offline fallbacks)
//! 5. Serve requests until terminated

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use aquaguard_providers::{FeatureSource, HttpProviders, OfflineProviders};
use aquaguard_scoring::Inferencer;
use aquaguard_server::{start_server, AppConfig, AppState};

/// Application entry point for the AquaGuard server.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("aquaguard-server starting");

    let config = AppConfig::from_env()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        offline = config.offline,
        model_path = %config.model_path.display(),
        "configuration loaded"
    );

    let inferencer = Inferencer::from_file(&config.model_path);

    let source = if config.offline {
        FeatureSource::Offline(OfflineProviders::default())
    } else {
        FeatureSource::Live(HttpProviders::new(config.providers.clone()))
    };
    info!(source = source.name(), "feature source ready");

    let state = Arc::new(AppState::new(source, inferencer));
    start_server(&config.server, state).await?;

    Ok(())
}
