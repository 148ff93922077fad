//! Shared application state for the AquaGuard API server.

use aquaguard_providers::{FeatureSource, OfflineProviders};
use aquaguard_scoring::Inferencer;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Both fields are read-only after startup: the feature
/// source holds an HTTP connection pool (or constants), and the
/// inferencer holds the optional classifier model. No locks are needed
/// because nothing here mutates across requests.
pub struct AppState {
    /// External geodata source (live HTTP or offline constants).
    pub source: FeatureSource,
    /// Classifier wrapper; degrades gracefully when no model is loaded.
    pub inferencer: Inferencer,
}

impl AppState {
    /// Assemble state from an already-built source and inferencer.
    pub const fn new(source: FeatureSource, inferencer: Inferencer) -> Self {
        Self { source, inferencer }
    }

    /// Fallback-only state: offline providers, no model. Used for the
    /// no-network mode and as the integration-test baseline.
    pub fn offline() -> Self {
        Self {
            source: FeatureSource::Offline(OfflineProviders::default()),
            inferencer: Inferencer::disabled(),
        }
    }
}
