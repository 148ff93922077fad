//! Overpass (OpenStreetMap) queries for a polygon.
//!
//! All queries use the `(poly:"lat lon ...")` filter built from the
//! region's exterior ring, so results are clipped to the drawn polygon
//! rather than its bounding box. Road length is summed from returned way
//! geometries with the haversine metric; footprint lookups only count
//! matching elements.

use aquaguard_geo::{haversine_km, Region};
use geo::Point;
use serde::Deserialize;

use crate::config::ProviderConfig;
use crate::error::ProviderError;

/// Top-level Overpass JSON response.
#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    /// Matched elements; empty when nothing in the polygon matched.
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// One Overpass element. Only the fields the pipelines read are kept.
#[derive(Debug, Deserialize)]
pub(crate) struct Element {
    /// Element centroid, present with `out center`.
    #[serde(default)]
    pub center: Option<LatLon>,
    /// Way vertex chain, present with `out geom`.
    #[serde(default)]
    pub geometry: Option<Vec<LatLon>>,
}

/// A latitude/longitude pair as Overpass serializes it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct LatLon {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl LatLon {
    /// Convert to a `geo` point (x = lon, y = lat).
    fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Total public road network length inside the region, in km.
pub(crate) async fn road_network_km(
    client: &reqwest::Client,
    config: &ProviderConfig,
    region: &Region,
) -> Result<f64, ProviderError> {
    let poly = poly_filter(region);
    let ql = format!(
        "[out:json][timeout:{t}];way[\"highway\"](poly:\"{poly}\");out geom;",
        t = config.feature_timeout.as_secs()
    );
    let response = run_query(client, config, ql).await?;

    let km: f64 = response
        .elements
        .iter()
        .filter_map(|element| element.geometry.as_deref())
        .map(way_length_km)
        .sum();
    Ok(km)
}

/// Number of building footprints inside the region.
pub(crate) async fn building_count(
    client: &reqwest::Client,
    config: &ProviderConfig,
    region: &Region,
) -> Result<u64, ProviderError> {
    let poly = poly_filter(region);
    let ql = format!(
        "[out:json][timeout:{t}];(way[\"building\"](poly:\"{poly}\");\
         relation[\"building\"](poly:\"{poly}\"););out ids;",
        t = config.feature_timeout.as_secs()
    );
    let response = run_query(client, config, ql).await?;
    Ok(response.elements.len() as u64)
}

/// Number of parks and forests inside the region.
pub(crate) async fn green_space_count(
    client: &reqwest::Client,
    config: &ProviderConfig,
    region: &Region,
) -> Result<u64, ProviderError> {
    let poly = poly_filter(region);
    let ql = format!(
        "[out:json][timeout:{t}];(way[\"leisure\"=\"park\"](poly:\"{poly}\");\
         relation[\"leisure\"=\"park\"](poly:\"{poly}\");\
         way[\"landuse\"=\"forest\"](poly:\"{poly}\");\
         relation[\"landuse\"=\"forest\"](poly:\"{poly}\"););out ids;",
        t = config.feature_timeout.as_secs()
    );
    let response = run_query(client, config, ql).await?;
    Ok(response.elements.len() as u64)
}

/// Centroids of water bodies inside the region.
pub(crate) async fn water_body_centers(
    client: &reqwest::Client,
    config: &ProviderConfig,
    region: &Region,
) -> Result<Vec<Point<f64>>, ProviderError> {
    let poly = poly_filter(region);
    let ql = format!(
        "[out:json][timeout:{t}];(way[\"natural\"=\"water\"](poly:\"{poly}\");\
         relation[\"natural\"=\"water\"](poly:\"{poly}\"););out center;",
        t = config.feature_timeout.as_secs()
    );
    let response = run_query(client, config, ql).await?;

    Ok(response
        .elements
        .into_iter()
        .filter_map(|element| element.center.map(LatLon::to_point))
        .collect())
}

/// Render the region's exterior ring as an Overpass `poly` filter value.
fn poly_filter(region: &Region) -> String {
    region
        .polygon()
        .exterior()
        .points()
        .map(|p| format!("{} {}", p.y(), p.x()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Length of one way in km, summed segment by segment.
fn way_length_km(vertices: &[LatLon]) -> f64 {
    vertices
        .windows(2)
        .map(|pair| haversine_km(pair[0].to_point(), pair[1].to_point()))
        .sum()
}

/// POST an Overpass QL query and decode the JSON response.
async fn run_query(
    client: &reqwest::Client,
    config: &ProviderConfig,
    ql: String,
) -> Result<OverpassResponse, ProviderError> {
    let response = client
        .post(&config.overpass_url)
        .timeout(config.feature_timeout)
        .body(ql)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status));
    }
    Ok(response.json().await?)
}
