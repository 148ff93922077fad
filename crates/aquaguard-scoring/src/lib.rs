//! Scoring and classification core for the AquaGuard service.
//!
//! Two structurally identical pipelines live here:
//!
//! - **Sustainability**: [`extract::zone_features`] turns a region into a
//!   [`ZoneFeatures`](aquaguard_types::ZoneFeatures) record, which feeds
//!   both the weighted composite score ([`normalize`]) and the classifier
//!   ([`infer`]). The two outputs are computed from the same features via
//!   unrelated formulas and may disagree; both are reported without
//!   reconciliation.
//! - **Flood risk**: [`flood::flood_assessment`] samples interior
//!   elevations and rainfall climatology and combines them through a
//!   logistic risk formula.
//!
//! Training-time pieces -- the rule-based labeler ([`label`]) and the
//! decision-tree forest ([`forest`]) -- share the same feature record as
//! the inference path, so the feature-order contract between trainer and
//! service is enforced by the type system rather than by convention.

pub mod error;
pub mod extract;
pub mod flood;
pub mod forest;
pub mod infer;
pub mod label;
pub mod normalize;

// Re-export primary items for convenience.
pub use error::ModelError;
pub use extract::{zone_features, ZoneReport};
pub use flood::{flood_assessment, risk_percent, FloodAssessment};
pub use forest::{Forest, ForestConfig};
pub use infer::Inferencer;
pub use label::rule_label;
pub use normalize::composite_score;
