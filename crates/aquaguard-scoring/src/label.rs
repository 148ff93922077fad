//! Rule-based ground-truth labeling for classifier training.
//!
//! This deterministic rule is the sole source of truth the forest is
//! trained against. Changing any constant here invalidates previously
//! trained model artifacts.

use aquaguard_types::{SustainabilityClass, ZoneFeatures};

const ROAD_WEIGHT: f64 = 2.0;
const GREEN_WEIGHT: f64 = 1.5;
const FLOOD_PENALTY: f64 = 3.0;
const WATER_PENALTY: f64 = 0.5;

/// Rule score above which a zone is labeled sustainable.
const SUSTAINABLE_THRESHOLD: f64 = 7.0;
/// Rule score above which a zone is labeled moderately sustainable.
const MODERATE_THRESHOLD: f64 = 3.0;

/// Assign the training label for a feature record.
pub fn rule_label(features: &ZoneFeatures) -> SustainabilityClass {
    let score = features.road_density * ROAD_WEIGHT + features.green_cover * GREEN_WEIGHT
        - features.flood_risk * FLOOD_PENALTY
        - features.distance_water * WATER_PENALTY;

    if score > SUSTAINABLE_THRESHOLD {
        SustainabilityClass::Sustainable
    } else if score > MODERATE_THRESHOLD {
        SustainabilityClass::ModeratelySustainable
    } else {
        SustainabilityClass::NotSustainable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(
        road_density: f64,
        green_cover: f64,
        flood_risk: f64,
        distance_water: f64,
    ) -> ZoneFeatures {
        ZoneFeatures {
            pop_density: 0.0,
            road_density,
            green_cover,
            distance_water,
            elevation: 0.0,
            flood_risk,
        }
    }

    #[test]
    fn dense_green_zone_is_sustainable() {
        // score = 2*4 + 1.5*2 - 3*0 - 0.5*1 = 10.5
        let label = rule_label(&features(4.0, 2.0, 0.0, 1.0));
        assert_eq!(label, SustainabilityClass::Sustainable);
    }

    #[test]
    fn sparse_flooded_zone_is_not_sustainable() {
        // score = 2*1 + 1.5*1 - 3*0.5 - 0.5*2 = 1.0
        let label = rule_label(&features(1.0, 1.0, 0.5, 2.0));
        assert_eq!(label, SustainabilityClass::NotSustainable);
    }

    #[test]
    fn middle_band_is_moderate() {
        // score = 2*2 + 1.5*1 - 0 - 0.5*2 = 4.5
        let label = rule_label(&features(2.0, 1.0, 0.0, 2.0));
        assert_eq!(label, SustainabilityClass::ModeratelySustainable);
    }

    #[test]
    fn boundary_scores_fall_to_the_lower_tier() {
        // score exactly 7 -> moderate, not sustainable.
        let label = rule_label(&features(3.5, 0.0, 0.0, 0.0));
        assert_eq!(label, SustainabilityClass::ModeratelySustainable);
        // score exactly 3 -> not sustainable.
        let label = rule_label(&features(1.5, 0.0, 0.0, 0.0));
        assert_eq!(label, SustainabilityClass::NotSustainable);
    }
}
