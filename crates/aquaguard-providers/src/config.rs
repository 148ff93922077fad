//! Provider endpoint and timeout configuration.

use std::time::Duration;

/// Endpoints and per-call timeouts for the three upstream services.
///
/// The defaults point at the public instances the original deployment
/// used. Timeouts are bounded so a stalled upstream resolves to its
/// fallback instead of holding a request open.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Overpass API interpreter endpoint.
    pub overpass_url: String,
    /// Open-Elevation batched lookup endpoint.
    pub elevation_url: String,
    /// NASA POWER climatology endpoint.
    pub power_url: String,
    /// Timeout for each Overpass feature query.
    pub feature_timeout: Duration,
    /// Timeout for the batched elevation lookup.
    pub elevation_timeout: Duration,
    /// Timeout for the rainfall climatology lookup.
    pub rainfall_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            overpass_url: String::from("https://overpass-api.de/api/interpreter"),
            elevation_url: String::from("https://api.open-elevation.com/api/v1/lookup"),
            power_url: String::from("https://power.larc.nasa.gov/api/temporal/climatology/point"),
            feature_timeout: Duration::from_secs(10),
            elevation_timeout: Duration::from_secs(15),
            rainfall_timeout: Duration::from_secs(10),
        }
    }
}
