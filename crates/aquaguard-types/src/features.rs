//! Feature records for the sustainability and flood pipelines.
//!
//! The classifier is trained on, and queried with, the array produced by
//! [`ZoneFeatures::to_array`]. Having a single named-field struct on both
//! sides is what keeps the trainer and the inference service in agreement
//! about feature ordering.

use serde::{Deserialize, Serialize};

/// Column names for the classifier input, in the exact order produced by
/// [`ZoneFeatures::to_array`]. Used for the training CSV header.
pub const FEATURE_NAMES: [&str; 6] = [
    "pop_density",
    "road_density",
    "green_cover",
    "distance_water",
    "elevation",
    "flood_risk",
];

/// Raw features derived for one zone by the sustainability pipeline.
///
/// All values are unnormalized. `pop_density` is a building-count proxy,
/// not a census figure, and `elevation` is a latitude-span proxy rather
/// than measured terrain height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneFeatures {
    /// Buildings per km² (proxy for population density).
    pub pop_density: f64,
    /// Road network length in km per km².
    pub road_density: f64,
    /// Green-space feature count scaled by 5 so it is comparable in
    /// magnitude to the percentage-valued subscores.
    pub green_cover: f64,
    /// Distance from the zone centroid to the nearest water body, km.
    pub distance_water: f64,
    /// Elevation proxy in meters: `30 + latitude_span_degrees * 1000`.
    pub elevation: f64,
    /// Flood-risk proxy in `[0, 1]`, inversely related to `elevation`.
    pub flood_risk: f64,
}

impl ZoneFeatures {
    /// Flatten into the fixed-order array the classifier was trained on.
    ///
    /// The order matches [`FEATURE_NAMES`]; changing it invalidates every
    /// previously trained model artifact.
    pub const fn to_array(&self) -> [f64; 6] {
        [
            self.pop_density,
            self.road_density,
            self.green_cover,
            self.distance_water,
            self.elevation,
            self.flood_risk,
        ]
    }
}

/// Rainfall climatology for a point, from NASA POWER or the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rainfall {
    /// Annual precipitation total, mm.
    pub annual_mm: f64,
    /// Wettest-month precipitation, mm.
    pub peak_month_mm: f64,
}

/// Aggregated terrain and rainfall metrics for the flood pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloodMetrics {
    /// Mean of the sampled elevations, meters.
    pub avg_elevation_m: f64,
    /// Population standard deviation of the sampled elevations.
    pub elevation_std: f64,
    /// Annual rainfall at the zone centroid, mm.
    pub annual_rainfall_mm: f64,
    /// Peak monthly rainfall at the zone centroid, mm.
    pub peak_monthly_mm: f64,
}
