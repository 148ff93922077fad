//! AquaGuard classifier training binary.
//!
//! Tiles a grid around a city center, extracts sustainability features
//! per cell, assigns rule-based ground-truth labels, writes the labeled
//! dataset as CSV, trains the decision-tree forest, and saves the model
//! artifact the server loads at startup.
//!
//! The feature extraction here is the same `zone_features` call the
//! server makes at request time, so there is no train/serve skew by
//! construction. The artifact's expected input order is likewise fixed
//! by the shared `ZoneFeatures::to_array`.

mod dataset;
mod error;

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aquaguard_geo::{make_grid, Region};
use aquaguard_providers::{FeatureSource, HttpProviders, OfflineProviders, ProviderConfig};
use aquaguard_scoring::forest::FeatureRow;
use aquaguard_scoring::{rule_label, zone_features, Forest, ForestConfig};
use aquaguard_types::TrainingSample;

use crate::dataset::write_dataset;
use crate::error::TrainerError;

/// Fraction of the corpus held out for the accuracy report.
const TEST_FRACTION: f64 = 0.25;

/// Trainer settings loaded from `AQUAGUARD_*` environment variables.
#[derive(Debug, Clone)]
struct TrainerConfig {
    city_lat: f64,
    city_lng: f64,
    grid_size_km: f64,
    rows: usize,
    cols: usize,
    dataset_path: PathBuf,
    model_path: PathBuf,
    offline: bool,
    seed: u64,
}

impl TrainerConfig {
    /// Defaults match the original deployment: a 10×10 grid of 1 km
    /// cells centered on Chennai.
    fn from_env() -> Result<Self, TrainerError> {
        Ok(Self {
            city_lat: parse_env("AQUAGUARD_CITY_LAT", 13.0827)?,
            city_lng: parse_env("AQUAGUARD_CITY_LNG", 80.2707)?,
            grid_size_km: parse_env("AQUAGUARD_GRID_SIZE_KM", 1.0)?,
            rows: parse_env("AQUAGUARD_GRID_ROWS", 10)?,
            cols: parse_env("AQUAGUARD_GRID_COLS", 10)?,
            dataset_path: PathBuf::from(env_or(
                "AQUAGUARD_DATASET_PATH",
                "data/zones_dataset.csv",
            )),
            model_path: PathBuf::from(env_or("AQUAGUARD_MODEL_PATH", "models/forest.json")),
            offline: parse_env("AQUAGUARD_OFFLINE", false)?,
            seed: parse_env("AQUAGUARD_SEED", 42)?,
        })
    }
}

/// Training entry point.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = TrainerConfig::from_env()?;
    info!(
        city_lat = config.city_lat,
        city_lng = config.city_lng,
        rows = config.rows,
        cols = config.cols,
        offline = config.offline,
        "aquaguard-trainer starting"
    );

    let source = if config.offline {
        FeatureSource::Offline(OfflineProviders::default())
    } else {
        FeatureSource::Live(HttpProviders::new(ProviderConfig::default()))
    };

    let samples = extract_samples(&config, &source).await?;
    write_dataset(&samples, &config.dataset_path)?;
    info!(
        samples = samples.len(),
        path = %config.dataset_path.display(),
        "dataset written"
    );

    let forest = train_and_report(&samples, config.seed);
    forest.save(&config.model_path)?;
    info!(path = %config.model_path.display(), "model artifact saved");

    Ok(())
}

/// Extract and label features for every grid cell, sequentially.
async fn extract_samples(
    config: &TrainerConfig,
    source: &FeatureSource,
) -> Result<Vec<TrainingSample>, TrainerError> {
    let grid = make_grid(
        config.city_lat,
        config.city_lng,
        config.grid_size_km,
        config.rows,
        config.cols,
    );

    let mut samples = Vec::with_capacity(grid.len());
    for (index, cell) in grid.iter().enumerate() {
        info!(cell = index + 1, total = grid.len(), "processing cell");
        let region = Region::from_bounds(cell.north, cell.south, cell.east, cell.west)?;
        let report = zone_features(&region, source).await;
        samples.push(TrainingSample {
            features: report.features,
            area_km2: report.area_km2,
            cell: *cell,
            label: rule_label(&report.features),
        });
    }
    Ok(samples)
}

/// Train the forest on a shuffled split and log held-out accuracy.
fn train_and_report(samples: &[TrainingSample], seed: u64) -> Forest {
    let rows: Vec<FeatureRow> = samples.iter().map(|s| s.features.to_array()).collect();
    let labels: Vec<u8> = samples.iter().map(|s| s.label.index()).collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let (train_idx, test_idx) = train_test_split(rows.len(), TEST_FRACTION, &mut rng);

    let train_rows: Vec<FeatureRow> = train_idx.iter().map(|&i| rows[i]).collect();
    let train_labels: Vec<u8> = train_idx.iter().map(|&i| labels[i]).collect();

    let forest = Forest::fit(&train_rows, &train_labels, ForestConfig::default(), &mut rng);

    let test_accuracy = accuracy(&forest, &rows, &labels, &test_idx);
    info!(
        trees = forest.tree_count(),
        train_samples = train_idx.len(),
        test_samples = test_idx.len(),
        test_accuracy,
        "forest trained"
    );
    forest
}

/// Shuffle `0..n` and split into (train, test) index sets.
fn train_test_split(
    n: usize,
    test_fraction: f64,
    rng: &mut StdRng,
) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);
    let test_len = ((n as f64) * test_fraction).round() as usize;
    let train = indices.split_off(test_len.min(n));
    (train, indices)
}

/// Fraction of held-out rows the forest labels correctly.
fn accuracy(forest: &Forest, rows: &[FeatureRow], labels: &[u8], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let correct = indices
        .iter()
        .filter(|&&i| {
            rows.get(i)
                .zip(labels.get(i))
                .is_some_and(|(row, &label)| forest.predict(row) == label)
        })
        .count();
    correct as f64 / indices.len() as f64
}

/// Read a variable with a default for the unset case.
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Read and parse a variable, defaulting when unset.
fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, TrainerError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| TrainerError::Config(format!("invalid {name}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn split_partitions_all_indices() {
        let mut rng = StdRng::seed_from_u64(1);
        let (train, test) = train_test_split(100, 0.25, &mut rng);
        assert_eq!(train.len(), 75);
        assert_eq!(test.len(), 25);

        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn accuracy_on_single_class_corpus_is_one() {
        let rows = vec![[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]; 20];
        let labels = vec![2u8; 20];
        let mut rng = StdRng::seed_from_u64(2);
        let forest = Forest::fit(&rows, &labels, ForestConfig::default(), &mut rng);

        let indices: Vec<usize> = (0..rows.len()).collect();
        assert_eq!(accuracy(&forest, &rows, &labels, &indices), 1.0);
    }

    #[tokio::test]
    async fn offline_extraction_covers_the_whole_grid() {
        let config = TrainerConfig {
            city_lat: 13.0827,
            city_lng: 80.2707,
            grid_size_km: 1.0,
            rows: 3,
            cols: 3,
            dataset_path: PathBuf::new(),
            model_path: PathBuf::new(),
            offline: true,
            seed: 42,
        };
        let source = FeatureSource::Offline(OfflineProviders::default());

        let samples = extract_samples(&config, &source).await.unwrap();
        assert_eq!(samples.len(), 9);
        // Offline lookups: zero densities everywhere, labels all class 0.
        for sample in &samples {
            assert_eq!(sample.features.road_density, 0.0);
            assert_eq!(sample.label.index(), 0);
        }
    }
}
