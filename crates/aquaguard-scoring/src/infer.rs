//! Classification inference over a loaded forest.
//!
//! The model is a read-only, process-wide resource: loaded once at
//! startup, wrapped in an [`Arc`], and injected into the inferencer.
//! Absence is a valid state -- classification then degrades to class 0
//! with zero confidence and never raises. The sustainability score path
//! does not depend on the model, so it is unaffected either way.

use std::path::Path;
use std::sync::Arc;

use aquaguard_types::{Classification, SustainabilityClass, ZoneFeatures};
use tracing::{info, warn};

use crate::forest::Forest;

/// Wraps the optional forest and produces [`Classification`] values.
#[derive(Debug, Clone)]
pub struct Inferencer {
    model: Option<Arc<Forest>>,
}

impl Inferencer {
    /// Wrap an already loaded (or absent) model handle.
    pub const fn new(model: Option<Arc<Forest>>) -> Self {
        Self { model }
    }

    /// An inferencer with no model; every call returns the degraded
    /// default.
    pub const fn disabled() -> Self {
        Self { model: None }
    }

    /// Load the model artifact from disk, degrading on failure.
    ///
    /// A missing or unreadable artifact is not an error: the service
    /// starts anyway and classifications return the degraded default.
    pub fn from_file(path: &Path) -> Self {
        match Forest::load(path) {
            Ok(forest) => {
                info!(
                    path = %path.display(),
                    trees = forest.tree_count(),
                    "classifier model loaded"
                );
                Self::new(Some(Arc::new(forest)))
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    %error,
                    "classifier model unavailable; predictions degrade to class 0"
                );
                Self::disabled()
            }
        }
    }

    /// Whether a model is loaded.
    pub const fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Classify a feature record.
    ///
    /// With a model: predicted class plus the maximum vote fraction
    /// scaled to `[0, 100]` as confidence. Without: class 0, confidence
    /// 0. Never fails.
    pub fn classify(&self, features: &ZoneFeatures) -> Classification {
        let Some(forest) = &self.model else {
            return Classification::degraded();
        };

        let row = features.to_array();
        let class = SustainabilityClass::from_index(forest.predict(&row));
        let confidence = forest
            .predict_probabilities(&row)
            .iter()
            .fold(0.0f64, |max, &p| max.max(p))
            * 100.0;

        Classification { class, confidence }
    }
}
