//! External geodata sources for the AquaGuard pipelines.
//!
//! Three upstream services feed the feature extractors:
//!
//! - **Overpass** (OpenStreetMap) -- road network, building footprints,
//!   green space, and water bodies for a polygon
//! - **Open-Elevation** -- batched point elevations
//! - **NASA POWER** -- rainfall climatology for a lat/lon
//!
//! # Graceful degradation
//!
//! The rest of the pipeline assumes these lookups never fail. Every
//! public lookup on [`FeatureSource`] returns a
//! [`Lookup`](aquaguard_types::Lookup): a timeout, transport fault, or
//! malformed payload is caught here, logged at `warn!`, and replaced by
//! the documented fallback constant with `used_fallback = true`. No
//! retries are performed; a failed lookup uses its fallback for the rest
//! of the request.
//!
//! [`FeatureSource`] uses enum dispatch (`Live` HTTP / `Offline`
//! constants) because async methods are not dyn-compatible. The
//! `Offline` variant doubles as the no-network mode and the test double.

pub mod config;
pub mod elevation;
pub mod error;
pub mod overpass;
pub mod rainfall;
pub mod source;

// Re-export primary types for convenience.
pub use config::ProviderConfig;
pub use error::ProviderError;
pub use source::{
    FeatureSource, HttpProviders, OfflineProviders, FALLBACK_BUILDING_COUNT,
    FALLBACK_ELEVATION_M, FALLBACK_GREEN_COUNT, FALLBACK_RAINFALL, FALLBACK_ROAD_KM,
    FALLBACK_WATER_DISTANCE_KM,
};
