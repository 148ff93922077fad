//! Batched point-elevation lookups via Open-Elevation.
//!
//! Elevations for all sampled points are fetched in a single POST so a
//! 15-point sample costs one round trip, not fifteen.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::ProviderError;

#[derive(Debug, Serialize)]
struct LookupRequest {
    locations: Vec<Location>,
}

#[derive(Debug, Serialize)]
struct Location {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: f64,
}

/// Fetch elevations in meters for all points in one batched call.
///
/// The returned vector is in request order. An empty result set is
/// treated as malformed so the caller falls back rather than averaging
/// over nothing.
pub(crate) async fn elevation_samples(
    client: &reqwest::Client,
    config: &ProviderConfig,
    points: &[Point<f64>],
) -> Result<Vec<f64>, ProviderError> {
    let body = LookupRequest {
        locations: points
            .iter()
            .map(|p| Location {
                latitude: p.y(),
                longitude: p.x(),
            })
            .collect(),
    };

    let response = client
        .post(&config.elevation_url)
        .timeout(config.elevation_timeout)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status));
    }

    let decoded: LookupResponse = response.json().await?;
    if decoded.results.is_empty() && !points.is_empty() {
        return Err(ProviderError::Malformed(String::from(
            "elevation response contained no results",
        )));
    }
    Ok(decoded.results.into_iter().map(|r| r.elevation).collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn response_decodes_in_order() {
        let decoded: LookupResponse = serde_json::from_str(
            r#"{"results": [
                {"latitude": 13.0, "longitude": 80.2, "elevation": 12.0},
                {"latitude": 13.1, "longitude": 80.3, "elevation": 48.5}
            ]}"#,
        )
        .unwrap();
        let elevations: Vec<f64> = decoded.results.into_iter().map(|r| r.elevation).collect();
        assert_eq!(elevations, vec![12.0, 48.5]);
    }

    #[test]
    fn request_serializes_latitude_longitude() {
        let body = LookupRequest {
            locations: vec![Location {
                latitude: 13.0,
                longitude: 80.2,
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["locations"][0]["latitude"], 13.0);
        assert_eq!(json["locations"][0]["longitude"], 80.2);
    }
}
