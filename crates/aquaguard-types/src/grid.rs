//! Training-grid cells and labeled samples.

use serde::{Deserialize, Serialize};

use crate::features::ZoneFeatures;
use crate::scores::SustainabilityClass;

/// One rectangular training tile, in degrees.
///
/// Produced deterministically by the grid generator and discarded after
/// the labeled dataset is assembled. Invariant: `north > south` and
/// `east > west`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Northern latitude bound.
    pub north: f64,
    /// Southern latitude bound.
    pub south: f64,
    /// Eastern longitude bound.
    pub east: f64,
    /// Western longitude bound.
    pub west: f64,
}

/// One row of the classifier training corpus: features, cell provenance,
/// derived area, and the rule-assigned ground-truth label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// The extracted feature record for the cell.
    pub features: ZoneFeatures,
    /// Cell area in km², kept for the dataset CSV.
    pub area_km2: f64,
    /// The grid cell the features were extracted from.
    pub cell: GridCell,
    /// Rule-based ground-truth label.
    pub label: SustainabilityClass,
}
