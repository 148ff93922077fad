//! Error types for the trainer binary.

use aquaguard_geo::GeoError;
use aquaguard_scoring::ModelError;

/// Errors that can abort a training run.
///
/// Unlike the serving path, training has no fallback story for its own
/// outputs: a dataset or artifact that cannot be written is a hard stop.
#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    /// An environment variable could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// A grid cell produced invalid region bounds.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeoError),

    /// The dataset CSV could not be written.
    #[error("dataset error: {0}")]
    Dataset(#[from] csv::Error),

    /// A filesystem operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The model artifact could not be saved.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}
