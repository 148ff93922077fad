//! Error types for region construction.
//!
//! These are the only geometric faults that reach a caller: a region that
//! cannot be built is a malformed request. Degenerate-but-valid geometry
//! (zero area) is not an error; dependents guard against it instead.

/// Errors raised while constructing a [`Region`](crate::Region).
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// A bounding rectangle violated `north > south` or `east > west`.
    #[error(
        "invalid bounds: north ({north}) must exceed south ({south}) and \
         east ({east}) must exceed west ({west})"
    )]
    InvalidBounds {
        /// Northern latitude bound.
        north: f64,
        /// Southern latitude bound.
        south: f64,
        /// Eastern longitude bound.
        east: f64,
        /// Western longitude bound.
        west: f64,
    },

    /// The polygon's exterior ring has fewer than four positions.
    #[error("polygon exterior ring needs at least 4 positions, got {0}")]
    DegenerateRing(usize),

    /// The GeoJSON geometry is not a polygon.
    #[error("unsupported GeoJSON geometry `{0}`, expected Polygon")]
    UnsupportedGeometry(String),

    /// A GeoJSON position did not carry longitude and latitude.
    #[error("malformed GeoJSON position, expected [lon, lat]")]
    MalformedPosition,
}
