//! Error types for model artifact persistence.

/// Errors raised while loading or saving a forest artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The artifact file could not be read or written.
    #[error("model file error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact JSON could not be encoded or decoded.
    #[error("model serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
