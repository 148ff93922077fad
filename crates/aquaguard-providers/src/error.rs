//! Internal error type for upstream lookups.
//!
//! [`ProviderError`] never crosses the crate boundary as an error: the
//! [`FeatureSource`](crate::FeatureSource) lookups catch it, log it, and
//! substitute the documented fallback value. It exists so the fallback
//! substitution is a single explicit match rather than a broad catch
//! buried in every client function.

/// Failure modes of an upstream data lookup.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport failure or timeout from the HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream returned a non-success status code.
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    /// The response body did not have the expected shape.
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}
