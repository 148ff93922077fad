//! Flood-risk assessment: elevation sampling, rainfall, and the risk
//! formula.
//!
//! The formula's constants are fixed design parameters: a logistic
//! elevation curve centered at 15 m (risk falls as elevation rises), a
//! slope factor that reduces risk by 40% over varied terrain, and a
//! 60/40 elevation/rain weighting.

use aquaguard_geo::{sample_interior, Region};
use aquaguard_providers::{FeatureSource, FALLBACK_ELEVATION_M};
use aquaguard_types::{FloodMetrics, Lookup};
use rand::Rng;
use tracing::debug;

use crate::normalize::round2;

/// Number of interior points sampled per assessment.
pub const SAMPLE_TARGET: usize = 15;
/// Rejection-sampling attempt cap; guarantees termination.
pub const SAMPLE_MAX_ATTEMPTS: usize = 100;

/// Center of the logistic elevation curve, meters.
const ELEV_CENTER_M: f64 = 15.0;
/// Steepness of the logistic elevation curve.
const ELEV_SLOPE: f64 = 0.1;
/// Elevation standard deviation below which terrain counts as flat.
const FLAT_STD_THRESHOLD_M: f64 = 2.0;
/// Risk multiplier for varied (non-flat) terrain.
const VARIED_TERRAIN_FACTOR: f64 = 0.6;
/// Weight of the elevation score in the combined risk.
const ELEV_WEIGHT: f64 = 0.6;
/// Weight of the rain score in the combined risk.
const RAIN_WEIGHT: f64 = 0.4;
/// Annual rainfall normalization ceiling, mm.
const ANNUAL_RAIN_SCALE_MM: f64 = 3000.0;
/// Peak-month rainfall normalization ceiling, mm.
const PEAK_RAIN_SCALE_MM: f64 = 500.0;

/// Result of a flood assessment for one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloodAssessment {
    /// Final risk in `[0, 100]`, two decimals.
    pub risk_percent: f64,
    /// The aggregated metrics behind the risk figure.
    pub metrics: FloodMetrics,
    /// True when elevation or rainfall resolved to a fallback.
    pub used_fallback: bool,
}

/// Assess flood risk for a region.
///
/// Samples up to [`SAMPLE_TARGET`] interior points, fetches their
/// elevations in one batched call, fetches rainfall climatology at the
/// centroid, and combines the aggregates through [`risk_percent`]. The
/// caller supplies the random source so assessments are reproducible
/// under test.
pub async fn flood_assessment<R: Rng + ?Sized>(
    region: &Region,
    source: &FeatureSource,
    rng: &mut R,
) -> FloodAssessment {
    let points = sample_interior(region, SAMPLE_TARGET, SAMPLE_MAX_ATTEMPTS, rng);

    // A polygon so thin that rejection sampling found nothing still gets
    // an answer: one fallback elevation stands in for the terrain.
    let elevations = if points.is_empty() {
        Lookup::fallback(vec![FALLBACK_ELEVATION_M])
    } else {
        source.elevation_samples(&points).await
    };

    let centroid = region.centroid();
    let (lat, lon) = centroid.map_or((0.0, 0.0), |c| (c.y(), c.x()));
    let rainfall = source.rainfall_climatology(lat, lon).await;

    let avg_elevation_m = mean(&elevations.value);
    let metrics = FloodMetrics {
        avg_elevation_m,
        elevation_std: std_dev(&elevations.value, avg_elevation_m),
        annual_rainfall_mm: rainfall.value.annual_mm,
        peak_monthly_mm: rainfall.value.peak_month_mm,
    };

    let risk = risk_percent(&metrics);
    debug!(
        samples = points.len(),
        avg_elevation_m,
        risk_percent = risk,
        "flood assessment complete"
    );

    FloodAssessment {
        risk_percent: risk,
        metrics,
        used_fallback: elevations.used_fallback || rainfall.used_fallback,
    }
}

/// Combine elevation and rainfall aggregates into a `[0, 100]` risk.
///
/// `elev_score = 100 / (1 + e^(0.1 (mean − 15)))`;
/// `rain_score = annual/3000·50 + peak/500·50`; flat terrain (std < 2)
/// keeps the full combined risk while varied terrain takes a 0.6
/// multiplier. The result is rounded to two decimals and capped at 100.
pub fn risk_percent(metrics: &FloodMetrics) -> f64 {
    let elev_score =
        100.0 / (1.0 + (ELEV_SLOPE * (metrics.avg_elevation_m - ELEV_CENTER_M)).exp());

    let slope_factor = if metrics.elevation_std < FLAT_STD_THRESHOLD_M {
        1.0
    } else {
        VARIED_TERRAIN_FACTOR
    };

    let rain_score = metrics.annual_rainfall_mm / ANNUAL_RAIN_SCALE_MM * 50.0
        + metrics.peak_monthly_mm / PEAK_RAIN_SCALE_MM * 50.0;

    let combined = elev_score * ELEV_WEIGHT + rain_score * RAIN_WEIGHT;
    round2(combined * slope_factor).min(100.0)
}

/// Arithmetic mean; 0 for an empty slice.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a known mean; 0 for an empty
/// slice. Matches the aggregation the trainer's dataset uses.
fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
