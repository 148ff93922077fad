//! Region geometry for the AquaGuard zone-assessment service.
//!
//! A [`Region`] is a simple polygon in geographic coordinates
//! (longitude/latitude), built either from a bounding rectangle or from a
//! GeoJSON polygon drawn on the map. This crate owns everything geometric
//! the pipelines need:
//!
//! - geodesic area in km² ([`Region::area_km2`])
//! - centroid and bounding box
//! - haversine point distance ([`haversine_km`])
//! - seeded rejection sampling of interior points ([`sample_interior`])
//! - the training grid generator ([`make_grid`])
//!
//! # Determinism
//!
//! Interior sampling takes an explicit `&mut impl Rng` so tests and the
//! trainer can seed a [`rand::rngs::StdRng`] and reproduce exact sample
//! sets.

pub mod error;
pub mod grid;
pub mod region;
pub mod sample;

// Re-export primary items for convenience.
pub use error::GeoError;
pub use grid::{make_grid, DEG_PER_KM};
pub use region::{haversine_km, Region};
pub use sample::sample_interior;
