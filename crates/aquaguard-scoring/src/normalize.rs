//! Composite sustainability scoring over normalized subscores.
//!
//! The weights are fixed design constants and must sum to exactly 1.0;
//! the composite score is a pure deterministic function of its inputs.

use aquaguard_types::Subscores;

/// Weight of the green-space subscore.
pub const WEIGHT_GREEN: f64 = 0.35;
/// Weight of the road-infrastructure subscore.
pub const WEIGHT_INFRASTRUCTURE: f64 = 0.25;
/// Weight of the population-density subscore.
pub const WEIGHT_POPULATION: f64 = 0.20;
/// Weight of the flood-safety subscore.
pub const WEIGHT_FLOOD_SAFETY: f64 = 0.20;

/// Weighted composite sustainability score in `[0, 100]`, one decimal.
///
/// Independent of the classifier's decision; the two may disagree and
/// both are reported to the caller.
pub fn composite_score(subscores: &Subscores) -> f64 {
    let weighted = subscores.green * WEIGHT_GREEN
        + subscores.infrastructure * WEIGHT_INFRASTRUCTURE
        + subscores.population * WEIGHT_POPULATION
        + subscores.flood_safety * WEIGHT_FLOOD_SAFETY;
    round1(weighted.clamp(0.0, 100.0))
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use aquaguard_types::ZoneFeatures;

    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum = WEIGHT_GREEN + WEIGHT_INFRASTRUCTURE + WEIGHT_POPULATION + WEIGHT_FLOOD_SAFETY;
        assert!((sum - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn perfect_subscores_score_one_hundred() {
        let subscores = Subscores {
            green: 100.0,
            infrastructure: 100.0,
            population: 100.0,
            flood_safety: 100.0,
        };
        assert_eq!(composite_score(&subscores), 100.0);
    }

    #[test]
    fn fallback_only_region_scores_from_flood_safety_alone() {
        // A region where every lookup fell back: only the flood-safety
        // term contributes. flood_risk 0.6 -> subscore 40 -> 0.2 * 40.
        let features = ZoneFeatures {
            pop_density: 0.0,
            road_density: 0.0,
            green_cover: 0.0,
            distance_water: 5.0,
            elevation: 40.0,
            flood_risk: 0.6,
        };
        let score = composite_score(&Subscores::from_features(&features));
        assert!((score - 8.0).abs() < 1e-9);
    }

    #[test]
    fn score_is_deterministic() {
        let features = ZoneFeatures {
            pop_density: 37.5,
            road_density: 9.1,
            green_cover: 20.0,
            distance_water: 1.2,
            elevation: 45.0,
            flood_risk: 0.55,
        };
        let subscores = Subscores::from_features(&features);
        let first = composite_score(&subscores);
        for _ in 0..10 {
            assert_eq!(composite_score(&subscores), first);
        }
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(12.36), 12.4);
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(12.346), 12.35);
    }
}
