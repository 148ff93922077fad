//! Service configuration loaded from environment variables.
//!
//! All variables are optional; the defaults run the service against the
//! public provider endpoints with the model artifact at
//! `models/forest.json`.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `AQUAGUARD_HOST` | `0.0.0.0` | Bind address |
//! | `AQUAGUARD_PORT` | `8080` | Bind port |
//! | `AQUAGUARD_MODEL_PATH` | `models/forest.json` | Classifier artifact |
//! | `AQUAGUARD_OFFLINE` | `false` | Use constant fallback providers |
//! | `AQUAGUARD_OVERPASS_URL` | public instance | Overpass endpoint |
//! | `AQUAGUARD_ELEVATION_URL` | public instance | Open-Elevation endpoint |
//! | `AQUAGUARD_POWER_URL` | public instance | NASA POWER endpoint |
//! | `AQUAGUARD_FEATURE_TIMEOUT_MS` | `10000` | Overpass query timeout |
//! | `AQUAGUARD_ELEVATION_TIMEOUT_MS` | `15000` | Elevation query timeout |
//! | `AQUAGUARD_RAINFALL_TIMEOUT_MS` | `10000` | Rainfall query timeout |

use std::path::PathBuf;
use std::time::Duration;

use aquaguard_providers::ProviderConfig;

use crate::server::ServerConfig;

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address and port.
    pub server: ServerConfig,
    /// Path to the classifier artifact.
    pub model_path: PathBuf,
    /// When true, skip live providers and answer from fallbacks.
    pub offline: bool,
    /// Provider endpoints and timeouts.
    pub providers: ProviderConfig,
}

/// Errors raised while reading the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid {name}: {message}")]
    Invalid {
        /// The environment variable name.
        name: &'static str,
        /// Why it could not be parsed.
        message: String,
    },
}

impl AppConfig {
    /// Load configuration from `AQUAGUARD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("AQUAGUARD_HOST", "0.0.0.0");
        let port: u16 = parse_env("AQUAGUARD_PORT", 8080)?;
        let model_path = PathBuf::from(env_or("AQUAGUARD_MODEL_PATH", "models/forest.json"));
        let offline: bool = parse_env("AQUAGUARD_OFFLINE", false)?;

        let defaults = ProviderConfig::default();
        let providers = ProviderConfig {
            overpass_url: env_or("AQUAGUARD_OVERPASS_URL", &defaults.overpass_url),
            elevation_url: env_or("AQUAGUARD_ELEVATION_URL", &defaults.elevation_url),
            power_url: env_or("AQUAGUARD_POWER_URL", &defaults.power_url),
            feature_timeout: Duration::from_millis(parse_env(
                "AQUAGUARD_FEATURE_TIMEOUT_MS",
                10_000,
            )?),
            elevation_timeout: Duration::from_millis(parse_env(
                "AQUAGUARD_ELEVATION_TIMEOUT_MS",
                15_000,
            )?),
            rainfall_timeout: Duration::from_millis(parse_env(
                "AQUAGUARD_RAINFALL_TIMEOUT_MS",
                10_000,
            )?),
        };

        Ok(Self {
            server: ServerConfig { host, port },
            model_path,
            offline,
            providers,
        })
    }
}

/// Read a variable with a default for the unset case.
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Read and parse a variable, defaulting when unset and failing loudly
/// when set to garbage.
fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
