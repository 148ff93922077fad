//! Integration tests for the AquaGuard API endpoints.
//!
//! Tests drive the Axum `Router` directly via `tower::ServiceExt`
//! without starting a TCP server. The offline feature source makes every
//! external lookup resolve to its documented fallback, so responses are
//! fully deterministic.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use aquaguard_providers::{FeatureSource, OfflineProviders};
use aquaguard_scoring::{Forest, ForestConfig, Inferencer};
use aquaguard_server::{build_router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tower::ServiceExt;

fn offline_state() -> Arc<AppState> {
    Arc::new(AppState::offline())
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =========================================================================
// GET /
// =========================================================================

#[tokio::test]
async fn index_returns_html() {
    let router = build_router(offline_state());

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

// =========================================================================
// POST /predict_zone
// =========================================================================

#[tokio::test]
async fn predict_zone_with_all_fallbacks_is_deterministic() {
    let router = build_router(offline_state());

    // 0.01° square near the equator; every provider lookup falls back.
    let body = serde_json::json!({
        "north": 0.01, "south": 0.0, "east": 0.01, "west": 0.0
    });
    let response = router.oneshot(post_json("/predict_zone", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    // Documented fallback constants flow straight through.
    assert_eq!(json["road_density"], 0.0);
    assert_eq!(json["pop_density"], 0.0);
    assert_eq!(json["green_cover"], 0.0);
    assert_eq!(json["distance_water"], 5.0);
    // elevation = 30 + 0.01 * 1000; flood risk = 1 - 40/100.
    assert_eq!(json["elevation"], 40.0);
    assert_eq!(json["flood_risk"], 0.6);

    // Only flood safety contributes: 0.20 * 40 = 8.0.
    assert_eq!(json["score"], 8.0);

    // No model loaded: degraded classification.
    assert_eq!(json["prediction_class"], 0);
    assert_eq!(json["decision"], "Not Sustainable");
    assert_eq!(json["confidence"], 0.0);

    // ~1.1 km on each side at the equator.
    let area = json["area_km2"].as_f64().unwrap();
    assert!((1.0..1.4).contains(&area), "area was {area}");
}

#[tokio::test]
async fn predict_zone_rejects_inverted_bounds() {
    let router = build_router(offline_state());

    let body = serde_json::json!({
        "north": 0.0, "south": 0.01, "east": 0.01, "west": 0.0
    });
    let response = router.oneshot(post_json("/predict_zone", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("invalid"));
}

#[tokio::test]
async fn predict_zone_with_model_reports_its_decision() {
    // A forest trained on a single-class corpus answers class 1 with
    // full confidence for any input.
    let rows = vec![[5.0, 2.0, 10.0, 1.0, 40.0, 0.6]; 30];
    let labels = vec![1u8; 30];
    let mut rng = StdRng::seed_from_u64(11);
    let forest = Forest::fit(&rows, &labels, ForestConfig::default(), &mut rng);

    let state = Arc::new(AppState::new(
        FeatureSource::Offline(OfflineProviders::default()),
        Inferencer::new(Some(Arc::new(forest))),
    ));
    let router = build_router(state);

    let body = serde_json::json!({
        "north": 0.01, "south": 0.0, "east": 0.01, "west": 0.0
    });
    let response = router.oneshot(post_json("/predict_zone", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["prediction_class"], 1);
    assert_eq!(json["decision"], "Moderately Sustainable");
    assert_eq!(json["confidence"], 100.0);

    // The composite score is independent of the classifier and keeps
    // its fallback-only value even when the decision disagrees.
    assert_eq!(json["score"], 8.0);
}

// =========================================================================
// POST /analyze
// =========================================================================

#[tokio::test]
async fn analyze_with_fallbacks_returns_documented_metrics() {
    let router = build_router(offline_state());

    let body = serde_json::json!({
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [80.2, 13.0], [80.2, 13.1], [80.3, 13.1], [80.3, 13.0], [80.2, 13.0]
            ]]
        }
    });
    let response = router.oneshot(post_json("/analyze", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["metrics"]["avg_elevation_m"], 50.0);
    assert_eq!(json["metrics"]["elevation_std"], 0.0);
    assert_eq!(json["metrics"]["annual_rainfall_mm"], 800.0);
    assert_eq!(json["metrics"]["peak_monthly_mm"], 100.0);

    // Constant 50 m terrain, fallback rainfall: risk ≈ 11.09.
    let risk = json["flood_risk_percent"].as_f64().unwrap();
    assert!((risk - 11.09).abs() < 0.05, "risk was {risk}");
}

#[tokio::test]
async fn analyze_rejects_non_polygon_geometry() {
    let router = build_router(offline_state());

    let body = serde_json::json!({
        "geometry": { "type": "Point", "coordinates": [80.2, 13.0] }
    });
    let response = router.oneshot(post_json("/analyze", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("Polygon"));
}
