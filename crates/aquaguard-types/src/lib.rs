//! Shared type definitions for the AquaGuard zone-assessment service.
//!
//! This crate is the single source of truth for the value types that flow
//! between the feature extractors, the scorers, the classifier, and the
//! HTTP layer. Both the trainer and the inference service depend on the
//! same [`ZoneFeatures`] record, so the feature ordering fed to the
//! classifier cannot silently drift between the two paths.
//!
//! # Modules
//!
//! - [`features`] -- named-field feature records for both pipelines
//! - [`scores`] -- normalized subscores, composite score, classification
//! - [`grid`] -- training-grid cells and labeled samples
//! - [`lookup`] -- fallback-aware wrapper for external lookup results

pub mod features;
pub mod grid;
pub mod lookup;
pub mod scores;

// Re-export all public types at crate root for convenience.
pub use features::{FloodMetrics, Rainfall, ZoneFeatures, FEATURE_NAMES};
pub use grid::{GridCell, TrainingSample};
pub use lookup::Lookup;
pub use scores::{Classification, Subscores, SustainabilityClass};
