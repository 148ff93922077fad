//! The unified [`FeatureSource`] and its fallback semantics.

use aquaguard_geo::{haversine_km, Region};
use aquaguard_types::{Lookup, Rainfall};
use geo::Point;
use tracing::warn;

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::{elevation, overpass, rainfall};

/// Fallback road network length, km.
pub const FALLBACK_ROAD_KM: f64 = 0.0;
/// Fallback building count.
pub const FALLBACK_BUILDING_COUNT: u64 = 0;
/// Fallback green-space count.
pub const FALLBACK_GREEN_COUNT: u64 = 0;
/// Fallback (and cap) for distance to the nearest water body, km.
pub const FALLBACK_WATER_DISTANCE_KM: f64 = 5.0;
/// Fallback elevation substituted per sampled point, meters.
pub const FALLBACK_ELEVATION_M: f64 = 50.0;
/// Fallback rainfall climatology: (annual, peak month) in mm.
pub const FALLBACK_RAINFALL: Rainfall = Rainfall {
    annual_mm: 800.0,
    peak_month_mm: 100.0,
};

/// A source of external geodata for the feature extractors.
///
/// Uses enum dispatch instead of trait objects because async methods
/// are not dyn-compatible in Rust. The extractors only see `Lookup`
/// values, so no lookup on this type can abort a pipeline run.
pub enum FeatureSource {
    /// Live HTTP lookups against Overpass, Open-Elevation, NASA POWER.
    Live(HttpProviders),
    /// Constant answers; the no-network mode and the test double.
    Offline(OfflineProviders),
}

impl FeatureSource {
    /// Human-readable name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Live(_) => "live",
            Self::Offline(_) => "offline",
        }
    }

    /// Total road network length in the region, km. Fallback: 0.
    pub async fn road_network_km(&self, region: &Region) -> Lookup<f64> {
        match self {
            Self::Offline(fixed) => Lookup::fallback(fixed.road_km),
            Self::Live(http) => recover(
                "road_network_km",
                FALLBACK_ROAD_KM,
                overpass::road_network_km(&http.client, &http.config, region).await,
            ),
        }
    }

    /// Building footprint count in the region. Fallback: 0.
    pub async fn building_count(&self, region: &Region) -> Lookup<u64> {
        match self {
            Self::Offline(fixed) => Lookup::fallback(fixed.building_count),
            Self::Live(http) => recover(
                "building_count",
                FALLBACK_BUILDING_COUNT,
                overpass::building_count(&http.client, &http.config, region).await,
            ),
        }
    }

    /// Park and forest footprint count in the region. Fallback: 0.
    pub async fn green_space_count(&self, region: &Region) -> Lookup<u64> {
        match self {
            Self::Offline(fixed) => Lookup::fallback(fixed.green_space_count),
            Self::Live(http) => recover(
                "green_space_count",
                FALLBACK_GREEN_COUNT,
                overpass::green_space_count(&http.client, &http.config, region).await,
            ),
        }
    }

    /// Haversine distance from the region centroid to the nearest water
    /// body centroid, km, capped at [`FALLBACK_WATER_DISTANCE_KM`].
    /// Fallback (also applied when no water is found): 5.0 km.
    pub async fn nearest_water_km(&self, region: &Region) -> Lookup<f64> {
        match self {
            Self::Offline(fixed) => Lookup::fallback(fixed.water_distance_km),
            Self::Live(http) => {
                let centers =
                    overpass::water_body_centers(&http.client, &http.config, region).await;
                match (region.centroid(), centers) {
                    (Some(centroid), Ok(centers)) if !centers.is_empty() => {
                        Lookup::fresh(nearest_km(centroid, &centers))
                    }
                    (_, Ok(_)) => Lookup::fallback(FALLBACK_WATER_DISTANCE_KM),
                    (_, Err(error)) => {
                        warn!(lookup = "nearest_water_km", %error, "lookup failed, using fallback");
                        Lookup::fallback(FALLBACK_WATER_DISTANCE_KM)
                    }
                }
            }
        }
    }

    /// Elevation in meters for each point, batched. Fallback: 50.0 per
    /// point, so the result always has one entry per requested point.
    pub async fn elevation_samples(&self, points: &[Point<f64>]) -> Lookup<Vec<f64>> {
        match self {
            Self::Offline(fixed) => Lookup::fallback(vec![fixed.elevation_m; points.len()]),
            Self::Live(http) => {
                match elevation::elevation_samples(&http.client, &http.config, points).await {
                    Ok(elevations) => Lookup::fresh(elevations),
                    Err(error) => {
                        warn!(lookup = "elevation_samples", %error, "lookup failed, using fallback");
                        Lookup::fallback(vec![FALLBACK_ELEVATION_M; points.len()])
                    }
                }
            }
        }
    }

    /// Rainfall climatology for a point. Fallback: (800, 100) mm.
    pub async fn rainfall_climatology(&self, lat: f64, lon: f64) -> Lookup<Rainfall> {
        match self {
            Self::Offline(fixed) => Lookup::fallback(fixed.rainfall),
            Self::Live(http) => recover(
                "rainfall_climatology",
                FALLBACK_RAINFALL,
                rainfall::rainfall_climatology(&http.client, &http.config, lat, lon).await,
            ),
        }
    }
}

/// Minimum haversine distance from `origin` to any center, capped at the
/// fallback distance (matching the original pipeline's 5 km cap).
fn nearest_km(origin: Point<f64>, centers: &[Point<f64>]) -> f64 {
    centers
        .iter()
        .map(|center| haversine_km(origin, *center))
        .fold(FALLBACK_WATER_DISTANCE_KM, f64::min)
}

/// Collapse a lookup result into a `Lookup`, logging the failure.
fn recover<T>(lookup: &'static str, fallback: T, result: Result<T, ProviderError>) -> Lookup<T> {
    match result {
        Ok(value) => Lookup::fresh(value),
        Err(error) => {
            warn!(lookup, %error, "lookup failed, using fallback");
            Lookup::fallback(fallback)
        }
    }
}

/// Live HTTP providers sharing one connection pool.
pub struct HttpProviders {
    pub(crate) client: reqwest::Client,
    pub(crate) config: ProviderConfig,
}

impl HttpProviders {
    /// Create live providers from endpoint configuration.
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

/// Constant-valued providers for offline operation and tests.
///
/// Every lookup reports `used_fallback = true` since no upstream data
/// is consulted. The defaults are the documented fallback constants;
/// tests override individual fields to steer the extractors.
#[derive(Debug, Clone, Copy)]
pub struct OfflineProviders {
    /// Road network length answer, km.
    pub road_km: f64,
    /// Building count answer.
    pub building_count: u64,
    /// Green-space count answer.
    pub green_space_count: u64,
    /// Nearest-water distance answer, km.
    pub water_distance_km: f64,
    /// Elevation answer per sampled point, meters.
    pub elevation_m: f64,
    /// Rainfall climatology answer.
    pub rainfall: Rainfall,
}

impl Default for OfflineProviders {
    fn default() -> Self {
        Self {
            road_km: FALLBACK_ROAD_KM,
            building_count: FALLBACK_BUILDING_COUNT,
            green_space_count: FALLBACK_GREEN_COUNT,
            water_distance_km: FALLBACK_WATER_DISTANCE_KM,
            elevation_m: FALLBACK_ELEVATION_M,
            rainfall: FALLBACK_RAINFALL,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn offline_lookups_report_fallback() {
        let source = FeatureSource::Offline(OfflineProviders::default());
        let region = Region::from_bounds(13.1, 13.0, 80.3, 80.2).unwrap();

        let roads = source.road_network_km(&region).await;
        assert_eq!(roads.value, FALLBACK_ROAD_KM);
        assert!(roads.used_fallback);

        let water = source.nearest_water_km(&region).await;
        assert_eq!(water.value, FALLBACK_WATER_DISTANCE_KM);

        let rain = source.rainfall_climatology(13.05, 80.25).await;
        assert_eq!(rain.value.annual_mm, 800.0);
        assert_eq!(rain.value.peak_month_mm, 100.0);
    }

    #[tokio::test]
    async fn offline_elevation_matches_point_count() {
        let source = FeatureSource::Offline(OfflineProviders::default());
        let points = vec![Point::new(80.25, 13.05); 15];
        let elevations = source.elevation_samples(&points).await;
        assert_eq!(elevations.value.len(), 15);
        assert!(elevations.value.iter().all(|&e| e == FALLBACK_ELEVATION_M));
    }

    #[test]
    fn nearest_km_is_capped_at_fallback() {
        let origin = Point::new(80.25, 13.05);
        // ~111 km away: still reported as the 5 km cap.
        let far = vec![Point::new(81.25, 13.05)];
        assert_eq!(nearest_km(origin, &far), FALLBACK_WATER_DISTANCE_KM);

        // A nearby center wins over the cap.
        let near = vec![Point::new(80.26, 13.05)];
        assert!(nearest_km(origin, &near) < 2.0);
    }
}
