//! Axum router construction for the AquaGuard API.
//!
//! Assembles the assessment routes into a single [`Router`] with CORS
//! middleware enabled so the map frontend can call the API cross-origin.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the AquaGuard server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `POST /predict_zone` -- sustainability assessment for a bounding box
/// - `POST /analyze` -- flood-risk assessment for a GeoJSON polygon
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/predict_zone", post(handlers::predict_zone))
        .route("/analyze", post(handlers::analyze))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
