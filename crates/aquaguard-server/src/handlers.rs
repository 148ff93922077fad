//! Endpoint handlers for the AquaGuard API.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `POST` | `/predict_zone` | Sustainability assessment of a bounding box |
//! | `POST` | `/analyze` | Flood-risk assessment of a GeoJSON polygon |

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use aquaguard_geo::Region;
use aquaguard_scoring::normalize::{round1, round2};
use aquaguard_scoring::{composite_score, flood_assessment, zone_features};
use aquaguard_types::Subscores;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /predict_zone`: a bounding rectangle in degrees.
#[derive(Debug, serde::Deserialize)]
pub struct BoundsRequest {
    /// Northern latitude bound.
    pub north: f64,
    /// Southern latitude bound.
    pub south: f64,
    /// Eastern longitude bound.
    pub east: f64,
    /// Western longitude bound.
    pub west: f64,
}

/// Body of `POST /analyze`: a drawn polygon as GeoJSON.
#[derive(Debug, serde::Deserialize)]
pub struct AnalyzeRequest {
    /// The polygon geometry (`{"type": "Polygon", "coordinates": ...}`).
    pub geometry: geojson::Geometry,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing service status and endpoints.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let source = state.source.name();
    let model = if state.inferencer.has_model() {
        "loaded"
    } else {
        "absent (degraded classification)"
    };

    Html(format!(
        r"<!DOCTYPE html>
<html lang='en'>
<head>
    <meta charset='utf-8'>
    <title>AquaGuard</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 720px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        code {{ background: #161b22; border: 1px solid #30363d; padding: 0.1rem 0.4rem; border-radius: 4px; }}
        li {{ padding: 0.3rem 0; }}
    </style>
</head>
<body>
    <h1>AquaGuard</h1>
    <p>Status: <span class='status'>RUNNING</span></p>
    <p>Data source: <code>{source}</code> &mdash; Classifier model: <code>{model}</code></p>
    <h2>Endpoints</h2>
    <ul>
        <li><code>POST /predict_zone</code> &mdash; sustainability score for a bounding box
            <code>{{north, south, east, west}}</code></li>
        <li><code>POST /analyze</code> &mdash; flood risk for a GeoJSON polygon
            <code>{{geometry}}</code></li>
    </ul>
</body>
</html>"
    ))
}

// ---------------------------------------------------------------------------
// POST /predict_zone -- sustainability assessment
// ---------------------------------------------------------------------------

/// Score and classify a rectangular zone.
///
/// The composite score and the classifier decision are computed from the
/// same features via unrelated formulas and may disagree; both are
/// reported without reconciliation.
pub async fn predict_zone(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BoundsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let region = Region::from_bounds(request.north, request.south, request.east, request.west)?;

    let report = zone_features(&region, &state.source).await;
    let features = &report.features;

    let score = composite_score(&Subscores::from_features(features));
    let classification = state.inferencer.classify(features);

    info!(
        area_km2 = report.area_km2,
        score,
        class = classification.class.index(),
        fallbacks = report.fallback_count,
        "zone assessed"
    );

    Ok(Json(serde_json::json!({
        "score": score,
        "prediction_class": classification.class.index(),
        "decision": classification.class.label(),
        "confidence": round1(classification.confidence),
        "area_km2": round2(report.area_km2),
        "road_density": round2(features.road_density),
        "pop_density": round2(features.pop_density),
        "distance_water": round2(features.distance_water),
        "green_cover": round2(features.green_cover),
        "elevation": round2(features.elevation),
        "flood_risk": round2(features.flood_risk),
    })))
}

// ---------------------------------------------------------------------------
// POST /analyze -- flood-risk assessment
// ---------------------------------------------------------------------------

/// Assess flood risk for a drawn polygon.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let region = Region::from_geojson(&request.geometry)?;

    let mut rng = StdRng::from_os_rng();
    let assessment = flood_assessment(&region, &state.source, &mut rng).await;

    info!(
        risk_percent = assessment.risk_percent,
        used_fallback = assessment.used_fallback,
        "flood risk assessed"
    );

    Ok(Json(serde_json::json!({
        "flood_risk_percent": assessment.risk_percent,
        "metrics": {
            "avg_elevation_m": round2(assessment.metrics.avg_elevation_m),
            "elevation_std": round2(assessment.metrics.elevation_std),
            "annual_rainfall_mm": assessment.metrics.annual_rainfall_mm,
            "peak_monthly_mm": assessment.metrics.peak_monthly_mm,
        },
    })))
}
