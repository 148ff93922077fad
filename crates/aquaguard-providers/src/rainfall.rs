//! Rainfall climatology lookups via NASA POWER.
//!
//! The POWER climatology endpoint returns the `PRECTOTCORR` parameter as
//! a map of month abbreviations (plus `ANN`) to millimeter totals. The
//! pipeline needs the annual total and the wettest month.

use std::collections::BTreeMap;

use aquaguard_types::Rainfall;
use serde::Deserialize;

use crate::config::ProviderConfig;
use crate::error::ProviderError;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: PowerParameter,
}

#[derive(Debug, Deserialize)]
struct PowerParameter {
    #[serde(rename = "PRECTOTCORR")]
    precipitation: BTreeMap<String, f64>,
}

/// Fetch annual and peak-monthly rainfall for a point.
pub(crate) async fn rainfall_climatology(
    client: &reqwest::Client,
    config: &ProviderConfig,
    lat: f64,
    lon: f64,
) -> Result<Rainfall, ProviderError> {
    let url = format!(
        "{}?parameters=PRECTOTCORR&community=RE&longitude={lon}&latitude={lat}&format=JSON",
        config.power_url
    );

    let response = client
        .get(&url)
        .timeout(config.rainfall_timeout)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status));
    }

    let decoded: PowerResponse = response.json().await?;
    extract_rainfall(&decoded.properties.parameter.precipitation)
}

/// Pull the annual total and wettest month out of the parameter map.
fn extract_rainfall(precipitation: &BTreeMap<String, f64>) -> Result<Rainfall, ProviderError> {
    let annual_mm = *precipitation
        .get("ANN")
        .ok_or_else(|| ProviderError::Malformed(String::from("PRECTOTCORR missing ANN")))?;

    let peak_month_mm = MONTHS
        .iter()
        .filter_map(|month| precipitation.get(*month))
        .fold(f64::NEG_INFINITY, |max, &mm| max.max(mm));
    if !peak_month_mm.is_finite() {
        return Err(ProviderError::Malformed(String::from(
            "PRECTOTCORR has no monthly values",
        )));
    }

    Ok(Rainfall {
        annual_mm,
        peak_month_mm,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn parameter_map(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect()
    }

    #[test]
    fn extracts_annual_and_peak() {
        let map = parameter_map(&[
            ("JAN", 20.0),
            ("JUN", 90.0),
            ("NOV", 310.5),
            ("DEC", 140.0),
            ("ANN", 1200.0),
        ]);
        let rainfall = extract_rainfall(&map).unwrap();
        assert_eq!(rainfall.annual_mm, 1200.0);
        assert_eq!(rainfall.peak_month_mm, 310.5);
    }

    #[test]
    fn missing_annual_is_malformed() {
        let map = parameter_map(&[("JAN", 20.0)]);
        assert!(matches!(
            extract_rainfall(&map),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn missing_months_is_malformed() {
        let map = parameter_map(&[("ANN", 800.0)]);
        assert!(matches!(
            extract_rainfall(&map),
            Err(ProviderError::Malformed(_))
        ));
    }
}
