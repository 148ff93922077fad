//! A small bootstrap-aggregated decision-tree forest.
//!
//! The original deployment trained an external random-forest classifier;
//! this module keeps that concern inside the workspace: gini-split CART
//! trees over the six-feature record, bagged with per-split feature
//! subsampling, majority-vote prediction, and vote-fraction probability
//! estimates. The artifact is plain JSON, so a trained forest can be
//! inspected with any text tool.
//!
//! The input row shape is [`ZoneFeatures::to_array`]; the trainer and
//! the inference service both go through that single function, which is
//! what makes the feature-order contract unbreakable.
//!
//! [`ZoneFeatures::to_array`]: aquaguard_types::ZoneFeatures::to_array

use std::path::Path;

use aquaguard_types::FEATURE_NAMES;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Number of input features per row.
pub const FEATURE_COUNT: usize = 6;
/// Number of output classes (the three sustainability tiers).
pub const CLASS_COUNT: usize = 3;

/// One classifier input row, in [`FEATURE_NAMES`] order.
pub type FeatureRow = [f64; FEATURE_COUNT];

/// Training hyperparameters for [`Forest::fit`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of bagged trees.
    pub tree_count: usize,
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Minimum samples on each side of a split.
    pub min_leaf: usize,
    /// Features considered per split (≤ [`FEATURE_COUNT`]).
    pub feature_candidates: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 25,
            max_depth: 8,
            min_leaf: 2,
            feature_candidates: 2,
        }
    }
}

/// Tree node, stored flat in the owning tree's node vector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum Node {
    /// Terminal node carrying the majority class.
    Leaf {
        /// Predicted class index.
        class: u8,
    },
    /// Internal split: `row[feature] <= threshold` goes left.
    Split {
        /// Index of the feature tested.
        feature: usize,
        /// Split threshold (midpoint between adjacent training values).
        threshold: f64,
        /// Node index of the left child.
        left: usize,
        /// Node index of the right child.
        right: usize,
    },
}

/// One gini-split decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DecisionTree {
    nodes: Vec<Node>,
    root: usize,
}

impl DecisionTree {
    /// Grow a tree over the rows selected by `indices`.
    fn fit<R: Rng + ?Sized>(
        rows: &[FeatureRow],
        labels: &[u8],
        indices: &[usize],
        config: &ForestConfig,
        rng: &mut R,
    ) -> Self {
        let mut nodes = Vec::new();
        let root = grow(&mut nodes, rows, labels, indices, 0, config, rng);
        Self { nodes, root }
    }

    /// Walk the tree for one row.
    fn predict(&self, row: &FeatureRow) -> u8 {
        let mut index = self.root;
        loop {
            match self.nodes.get(index) {
                Some(Node::Leaf { class }) => return *class,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    index = if row.get(*feature).copied().unwrap_or(0.0) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                // Unreachable for trees built by `fit`; degrade safely.
                None => return 0,
            }
        }
    }
}

/// Recursively grow a subtree, returning its node index.
fn grow<R: Rng + ?Sized>(
    nodes: &mut Vec<Node>,
    rows: &[FeatureRow],
    labels: &[u8],
    indices: &[usize],
    depth: usize,
    config: &ForestConfig,
    rng: &mut R,
) -> usize {
    let counts = class_counts(labels, indices);
    let majority = argmax(&counts) as u8;

    let is_pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
    if is_pure || depth >= config.max_depth || indices.len() < config.min_leaf * 2 {
        nodes.push(Node::Leaf { class: majority });
        return nodes.len() - 1;
    }

    let Some((feature, threshold)) = best_split(rows, labels, indices, config, rng) else {
        nodes.push(Node::Leaf { class: majority });
        return nodes.len() - 1;
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| rows.get(i).is_some_and(|row| row[feature] <= threshold));

    let left = grow(nodes, rows, labels, &left_idx, depth + 1, config, rng);
    let right = grow(nodes, rows, labels, &right_idx, depth + 1, config, rng);
    nodes.push(Node::Split {
        feature,
        threshold,
        left,
        right,
    });
    nodes.len() - 1
}

/// Find the gini-best `(feature, threshold)` among a random feature
/// subset, or `None` when no split improves on the parent.
fn best_split<R: Rng + ?Sized>(
    rows: &[FeatureRow],
    labels: &[u8],
    indices: &[usize],
    config: &ForestConfig,
    rng: &mut R,
) -> Option<(usize, f64)> {
    let mut features: Vec<usize> = (0..FEATURE_COUNT).collect();
    features.shuffle(rng);
    features.truncate(config.feature_candidates.clamp(1, FEATURE_COUNT));

    let parent_gini = gini(&class_counts(labels, indices));
    let mut best: Option<(usize, f64, f64)> = None;

    for &feature in &features {
        let mut values: Vec<f64> = indices
            .iter()
            .filter_map(|&i| rows.get(i).map(|row| row[feature]))
            .collect();
        values.sort_by(f64::total_cmp);
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let Some(impurity) =
                split_impurity(rows, labels, indices, feature, threshold, config.min_leaf)
            else {
                continue;
            };
            if impurity < parent_gini - 1e-12
                && best.is_none_or(|(_, _, best_impurity)| impurity < best_impurity)
            {
                best = Some((feature, threshold, impurity));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

/// Weighted gini impurity of a candidate split, or `None` when a side
/// would fall under the leaf minimum.
fn split_impurity(
    rows: &[FeatureRow],
    labels: &[u8],
    indices: &[usize],
    feature: usize,
    threshold: f64,
    min_leaf: usize,
) -> Option<f64> {
    let mut left = [0usize; CLASS_COUNT];
    let mut right = [0usize; CLASS_COUNT];
    for &i in indices {
        let row = rows.get(i)?;
        let label = *labels.get(i)? as usize;
        let side = if row[feature] <= threshold {
            &mut left
        } else {
            &mut right
        };
        if let Some(count) = side.get_mut(label.min(CLASS_COUNT - 1)) {
            *count += 1;
        }
    }

    let (n_left, n_right) = (left.iter().sum::<usize>(), right.iter().sum::<usize>());
    if n_left < min_leaf || n_right < min_leaf {
        return None;
    }

    let total = (n_left + n_right) as f64;
    Some((n_left as f64 * gini(&left) + n_right as f64 * gini(&right)) / total)
}

/// Gini impurity of a class histogram.
fn gini(counts: &[usize; CLASS_COUNT]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| (c as f64 / total).powi(2))
        .sum::<f64>()
}

/// Class histogram over the selected rows.
fn class_counts(labels: &[u8], indices: &[usize]) -> [usize; CLASS_COUNT] {
    let mut counts = [0usize; CLASS_COUNT];
    for &i in indices {
        if let Some(&label) = labels.get(i) {
            if let Some(count) = counts.get_mut((label as usize).min(CLASS_COUNT - 1)) {
                *count += 1;
            }
        }
    }
    counts
}

/// Index of the largest count (first wins on ties).
fn argmax(counts: &[usize; CLASS_COUNT]) -> usize {
    let mut best = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = i;
        }
    }
    best
}

/// A trained forest, the process-wide read-only model.
///
/// Loaded once at startup and shared across concurrent requests without
/// mutation; prediction takes `&self` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forest {
    trees: Vec<DecisionTree>,
    /// The hyperparameters the forest was trained with.
    pub config: ForestConfig,
    /// Feature column names in input order, echoed for artifact sanity.
    pub feature_names: Vec<String>,
    /// When the forest was trained.
    pub trained_at: DateTime<Utc>,
}

impl Forest {
    /// Train a forest on labeled rows.
    ///
    /// Each tree sees a bootstrap resample of the corpus. An empty
    /// corpus yields an empty forest whose predictions degrade to
    /// class 0 with zero-information probabilities.
    pub fn fit<R: Rng + ?Sized>(
        rows: &[FeatureRow],
        labels: &[u8],
        config: ForestConfig,
        rng: &mut R,
    ) -> Self {
        let n = rows.len().min(labels.len());
        let mut trees = Vec::with_capacity(config.tree_count);
        if n > 0 {
            for _ in 0..config.tree_count {
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
                trees.push(DecisionTree::fit(rows, labels, &bootstrap, &config, rng));
            }
        }
        Self {
            trees,
            config,
            feature_names: FEATURE_NAMES.iter().map(|&s| s.to_owned()).collect(),
            trained_at: Utc::now(),
        }
    }

    /// Majority-vote class prediction in `{0, 1, 2}`.
    pub fn predict(&self, row: &FeatureRow) -> u8 {
        argmax(&self.votes(row)) as u8
    }

    /// Per-class vote fractions; all zeros for an empty forest.
    pub fn predict_probabilities(&self, row: &FeatureRow) -> [f64; CLASS_COUNT] {
        let votes = self.votes(row);
        let total: usize = votes.iter().sum();
        let mut probabilities = [0.0; CLASS_COUNT];
        if total > 0 {
            for (p, &v) in probabilities.iter_mut().zip(votes.iter()) {
                *p = v as f64 / total as f64;
            }
        }
        probabilities
    }

    /// Number of trees in the forest.
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Load a forest artifact from JSON on disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the forest artifact as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn votes(&self, row: &FeatureRow) -> [usize; CLASS_COUNT] {
        let mut votes = [0usize; CLASS_COUNT];
        for tree in &self.trees {
            let class = tree.predict(row) as usize;
            if let Some(count) = votes.get_mut(class.min(CLASS_COUNT - 1)) {
                *count += 1;
            }
        }
        votes
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// Two cleanly separated clusters: class 0 near the origin, class 2
    /// shifted along every axis.
    fn separable_corpus() -> (Vec<FeatureRow>, Vec<u8>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..60 {
            let jitter: f64 = rng.random_range(-0.2..0.2);
            rows.push([
                1.0 + jitter,
                1.0 + jitter,
                0.0,
                5.0,
                40.0 + jitter,
                0.6,
            ]);
            labels.push(0);
            rows.push([
                60.0 + jitter,
                12.0 + jitter,
                25.0,
                0.5,
                90.0 + jitter,
                0.1,
            ]);
            labels.push(2);
        }
        (rows, labels)
    }

    #[test]
    fn forest_separates_clean_clusters() {
        let (rows, labels) = separable_corpus();
        let mut rng = StdRng::seed_from_u64(42);
        let forest = Forest::fit(&rows, &labels, ForestConfig::default(), &mut rng);

        assert_eq!(forest.tree_count(), 25);
        assert_eq!(forest.predict(&[1.0, 1.0, 0.0, 5.0, 40.0, 0.6]), 0);
        assert_eq!(forest.predict(&[60.0, 12.0, 25.0, 0.5, 90.0, 0.1]), 2);
    }

    #[test]
    fn probabilities_sum_to_one_on_trained_forest() {
        let (rows, labels) = separable_corpus();
        let mut rng = StdRng::seed_from_u64(42);
        let forest = Forest::fit(&rows, &labels, ForestConfig::default(), &mut rng);

        let probabilities = forest.predict_probabilities(&[1.0, 1.0, 0.0, 5.0, 40.0, 0.6]);
        let sum: f64 = probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(probabilities[0] > 0.9);
    }

    #[test]
    fn empty_corpus_degrades_to_class_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let forest = Forest::fit(&[], &[], ForestConfig::default(), &mut rng);
        assert_eq!(forest.tree_count(), 0);
        assert_eq!(forest.predict(&[0.0; FEATURE_COUNT]), 0);
        assert_eq!(
            forest.predict_probabilities(&[0.0; FEATURE_COUNT]),
            [0.0; CLASS_COUNT]
        );
    }

    #[test]
    fn training_is_reproducible_with_a_seed() {
        let (rows, labels) = separable_corpus();
        let forest_a = Forest::fit(
            &rows,
            &labels,
            ForestConfig::default(),
            &mut StdRng::seed_from_u64(7),
        );
        let forest_b = Forest::fit(
            &rows,
            &labels,
            ForestConfig::default(),
            &mut StdRng::seed_from_u64(7),
        );
        let row = [30.0, 6.0, 10.0, 2.0, 70.0, 0.3];
        assert_eq!(
            forest_a.predict_probabilities(&row),
            forest_b.predict_probabilities(&row)
        );
    }

    #[test]
    fn artifact_round_trips_through_json() {
        let (rows, labels) = separable_corpus();
        let mut rng = StdRng::seed_from_u64(42);
        let forest = Forest::fit(&rows, &labels, ForestConfig::default(), &mut rng);

        let encoded = serde_json::to_string(&forest).unwrap();
        let decoded: Forest = serde_json::from_str(&encoded).unwrap();
        let row = [1.0, 1.0, 0.0, 5.0, 40.0, 0.6];
        assert_eq!(forest.predict(&row), decoded.predict(&row));
        assert_eq!(decoded.feature_names[0], "pop_density");
    }

    #[test]
    fn gini_of_pure_and_even_histograms() {
        assert_eq!(gini(&[10, 0, 0]), 0.0);
        let even = gini(&[10, 10, 10]);
        assert!((even - (1.0 - 3.0 * (1.0f64 / 3.0).powi(2))).abs() < 1e-12);
    }
}
