//! HTTP service for the AquaGuard zone-assessment pipelines.
//!
//! This crate provides an Axum server exposing:
//!
//! - **`POST /predict_zone`** -- sustainability assessment of a bounding
//!   box: composite score, classifier decision, and the raw feature
//!   breakdown
//! - **`POST /analyze`** -- flood-risk assessment of a GeoJSON polygon:
//!   risk percentage plus elevation and rainfall metrics
//! - **`GET /`** -- minimal HTML status page
//!
//! # Architecture
//!
//! Each request is processed synchronously and independently. The only
//! cross-request state is the read-only classifier model inside
//! [`AppState`], loaded once at startup -- safe for unlimited concurrent
//! readers without locks. External lookups resolve to fallbacks on
//! failure, so the only client-visible errors are malformed requests.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use config::AppConfig;
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use state::AppState;
