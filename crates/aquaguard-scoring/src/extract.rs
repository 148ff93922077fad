//! Sustainability feature extraction for a region.
//!
//! Combines geometric quantities with external lookups into the
//! fixed-shape [`ZoneFeatures`] record. The same function serves the
//! inference path and the trainer, which is what keeps training-time and
//! request-time features consistent.

use aquaguard_geo::Region;
use aquaguard_providers::FeatureSource;
use aquaguard_types::ZoneFeatures;
use tracing::debug;

/// Base of the elevation proxy, meters.
const ELEVATION_BASE_M: f64 = 30.0;
/// Meters of proxy elevation per degree of latitude span.
const ELEVATION_PER_LAT_DEGREE: f64 = 1000.0;
/// Scale factor making green counts comparable to percentage scores.
const GREEN_COVER_SCALE: f64 = 5.0;

/// Extraction result: the feature record plus reporting extras.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneReport {
    /// The extracted feature record.
    pub features: ZoneFeatures,
    /// Region area in km², reported alongside the score.
    pub area_km2: f64,
    /// How many of the four external lookups resolved to a fallback.
    pub fallback_count: usize,
}

/// Derive the sustainability features for a region.
///
/// External lookups are issued sequentially and never fail (see
/// [`aquaguard_providers`]); a zero-area region yields zero densities via
/// guarded division rather than a fault.
///
/// The `elevation` field is a deliberate proxy -- `30 + lat_span × 1000`
/// -- coupling "elevation" to the region's latitude extent, and
/// `flood_risk` is a pure function of it. Callers must not assume
/// physical accuracy of either.
pub async fn zone_features(region: &Region, source: &FeatureSource) -> ZoneReport {
    let area_km2 = region.area_km2();

    let roads = source.road_network_km(region).await;
    let buildings = source.building_count(region).await;
    let green = source.green_space_count(region).await;
    let water = source.nearest_water_km(region).await;

    let fallback_count = [
        roads.used_fallback,
        buildings.used_fallback,
        green.used_fallback,
        water.used_fallback,
    ]
    .iter()
    .filter(|&&used| used)
    .count();

    let elevation = ELEVATION_BASE_M + region.lat_span() * ELEVATION_PER_LAT_DEGREE;
    let features = ZoneFeatures {
        pop_density: density(buildings.value as f64, area_km2),
        road_density: density(roads.value, area_km2),
        green_cover: green.value as f64 * GREEN_COVER_SCALE,
        distance_water: water.value,
        elevation,
        flood_risk: (1.0 - elevation / 100.0).clamp(0.0, 1.0),
    };

    debug!(
        area_km2,
        fallback_count,
        road_density = features.road_density,
        pop_density = features.pop_density,
        "zone features extracted"
    );

    ZoneReport {
        features,
        area_km2,
        fallback_count,
    }
}

/// Per-km² density with a guard for degenerate regions.
fn density(total: f64, area_km2: f64) -> f64 {
    if area_km2 > 0.0 { total / area_km2 } else { 0.0 }
}
