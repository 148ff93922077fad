//! Normalized subscores, the composite score inputs, and classification
//! results.

use serde::{Deserialize, Serialize};

use crate::features::ZoneFeatures;

/// The four normalized proxy dimensions, each clamped to `[0, 100]`.
///
/// Construction via [`Subscores::from_features`] is the only path, so the
/// clamping invariant cannot be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subscores {
    /// Green-space coverage subscore.
    pub green: f64,
    /// Road-infrastructure subscore.
    pub infrastructure: f64,
    /// Population-density subscore.
    pub population: f64,
    /// Flood-safety subscore (high means safe).
    pub flood_safety: f64,
}

impl Subscores {
    /// Normalize raw features into the four `[0, 100]` subscores.
    pub fn from_features(features: &ZoneFeatures) -> Self {
        Self {
            green: features.green_cover.clamp(0.0, 100.0),
            infrastructure: (features.road_density * 5.0).clamp(0.0, 100.0),
            population: (features.pop_density * 2.0).clamp(0.0, 100.0),
            flood_safety: ((1.0 - features.flood_risk) * 100.0).clamp(0.0, 100.0),
        }
    }
}

/// Sustainability tier assigned by the classifier or the rule labeler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SustainabilityClass {
    /// Class 0 -- the zone is not suitable for sustainable development.
    NotSustainable,
    /// Class 1 -- the zone is moderately sustainable.
    ModeratelySustainable,
    /// Class 2 -- the zone is sustainable.
    Sustainable,
}

impl SustainabilityClass {
    /// Numeric class index used in the training CSV and the API response.
    pub const fn index(self) -> u8 {
        match self {
            Self::NotSustainable => 0,
            Self::ModeratelySustainable => 1,
            Self::Sustainable => 2,
        }
    }

    /// Map a numeric class index back to a tier. Out-of-range indices
    /// resolve to [`Self::NotSustainable`], the safe default.
    pub const fn from_index(index: u8) -> Self {
        match index {
            2 => Self::Sustainable,
            1 => Self::ModeratelySustainable,
            _ => Self::NotSustainable,
        }
    }

    /// Human-readable decision label for API responses.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotSustainable => "Not Sustainable",
            Self::ModeratelySustainable => "Moderately Sustainable",
            Self::Sustainable => "Sustainable",
        }
    }
}

/// Output of the classification path for one zone.
///
/// Stateless and request-scoped. May disagree with the composite score;
/// both are reported to the caller without reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Predicted sustainability tier.
    pub class: SustainabilityClass,
    /// Maximum class probability scaled to `[0, 100]`, or 0 when no
    /// probability estimate is available.
    pub confidence: f64,
}

impl Classification {
    /// The degraded default returned when no model is loaded.
    pub const fn degraded() -> Self {
        Self {
            class: SustainabilityClass::NotSustainable,
            confidence: 0.0,
        }
    }
}
