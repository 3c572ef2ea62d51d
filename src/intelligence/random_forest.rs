// ABOUTME: Seeded decision-tree ensemble for activity classification
// ABOUTME: Implements Gini-split CART trees with bootstrap sampling and majority voting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

//! Decision-tree ensemble.
//!
//! Every source of randomness derives from the configured seed (tree `i`
//! seeds its own RNG from `seed + i`), and every tie-break is
//! deterministic, so a fit over the same data with the same
//! configuration produces bit-identical predictions regardless of how
//! `rayon` schedules the per-tree work.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::constants::defaults;

/// Tunables for ensemble construction.
#[derive(Debug, Clone)]
pub struct RandomForestConfig {
    /// Number of trees
    pub trees: usize,
    /// Depth bound per tree
    pub max_depth: usize,
    /// Minimum samples a node needs before it may split
    pub min_samples_split: usize,
    /// Base seed; tree `i` derives its RNG from `seed + i`
    pub seed: u64,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        Self {
            trees: defaults::FOREST_SIZE,
            max_depth: defaults::MAX_TREE_DEPTH,
            min_samples_split: defaults::MIN_SAMPLES_SPLIT,
            seed: defaults::SPLIT_SEED,
        }
    }
}

enum Node {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    fn fit(
        features: &[Vec<f64>],
        y: &[usize],
        n_classes: usize,
        config: &RandomForestConfig,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        // Bootstrap sample: n draws with replacement
        let n = features.len();
        let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        let root = grow(
            features,
            y,
            &sample,
            n_classes,
            config.max_depth,
            config.min_samples_split,
            rng,
        );
        Self { root }
    }

    fn predict(&self, row: &[f64]) -> usize {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn class_counts(y: &[usize], rows: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &row in rows {
        counts[y[row]] += 1;
    }
    counts
}

/// Index of the largest count; ties go to the lowest index, which keeps
/// voting deterministic.
fn majority(counts: &[usize]) -> usize {
    let mut best = 0;
    for (index, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = index;
        }
    }
    best
}

#[allow(clippy::cast_precision_loss)] // Sample counts are small
fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&count| {
            let p = count as f64 / total;
            p * p
        })
        .sum::<f64>()
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn grow(
    features: &[Vec<f64>],
    y: &[usize],
    rows: &[usize],
    n_classes: usize,
    depth_left: usize,
    min_samples_split: usize,
    rng: &mut ChaCha8Rng,
) -> Node {
    let counts = class_counts(y, rows, n_classes);
    let majority_class = majority(&counts);

    let distinct_classes = counts.iter().filter(|&&count| count > 0).count();
    if depth_left == 0 || rows.len() < min_samples_split || distinct_classes <= 1 {
        return Node::Leaf {
            class: majority_class,
        };
    }

    // Random feature subset of size ceil(sqrt(m)), the usual forest
    // de-correlation device
    let n_features = features[0].len();
    let subset_size = ((n_features as f64).sqrt().ceil() as usize).clamp(1, n_features);
    let mut candidates: Vec<usize> = (0..n_features).collect();
    candidates.shuffle(rng);
    candidates.truncate(subset_size);

    let parent_gini = gini(&counts, rows.len());
    let mut best: Option<(usize, f64, f64)> = None;

    for &feature in &candidates {
        let mut values: Vec<f64> = rows.iter().map(|&row| features[row][feature]).collect();
        values.sort_by(f64::total_cmp);
        values.dedup();

        for pair in values.windows(2) {
            let threshold = f64::midpoint(pair[0], pair[1]);

            let mut left_counts = vec![0usize; n_classes];
            let mut left_total = 0usize;
            for &row in rows {
                if features[row][feature] <= threshold {
                    left_counts[y[row]] += 1;
                    left_total += 1;
                }
            }
            let right_total = rows.len() - left_total;
            if left_total == 0 || right_total == 0 {
                continue;
            }
            let right_counts: Vec<usize> = counts
                .iter()
                .zip(&left_counts)
                .map(|(&all, &left)| all - left)
                .collect();

            let weighted = (left_total as f64).mul_add(
                gini(&left_counts, left_total),
                right_total as f64 * gini(&right_counts, right_total),
            ) / rows.len() as f64;
            let gain = parent_gini - weighted;

            let improves = best.map_or(true, |(_, _, best_gain)| gain > best_gain);
            if improves {
                best = Some((feature, threshold, gain));
            }
        }
    }

    match best {
        Some((feature, threshold, gain)) if gain > 1e-12 => {
            let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
                .iter()
                .partition(|&&row| features[row][feature] <= threshold);

            Node::Split {
                feature,
                threshold,
                left: Box::new(grow(
                    features,
                    y,
                    &left_rows,
                    n_classes,
                    depth_left - 1,
                    min_samples_split,
                    rng,
                )),
                right: Box::new(grow(
                    features,
                    y,
                    &right_rows,
                    n_classes,
                    depth_left - 1,
                    min_samples_split,
                    rng,
                )),
            }
        }
        _ => Node::Leaf {
            class: majority_class,
        },
    }
}

/// Ensemble of decision trees with majority-vote prediction.
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    classes: Vec<String>,
}

impl RandomForest {
    /// Train an ensemble over the given rows and labels.
    ///
    /// Trees are grown in parallel; determinism is unaffected because
    /// each tree's RNG derives only from its index.
    ///
    /// # Panics
    ///
    /// Panics when `features` is empty or misaligned with `labels`;
    /// callers gate on the training threshold before reaching this.
    #[must_use]
    pub fn fit(features: &[Vec<f64>], labels: &[String], config: &RandomForestConfig) -> Self {
        assert!(
            !features.is_empty() && features.len() == labels.len(),
            "training data must be non-empty and aligned"
        );

        let mut classes: Vec<String> = labels.to_vec();
        classes.sort();
        classes.dedup();
        let y: Vec<usize> = labels
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_default())
            .collect();

        let trees: Vec<DecisionTree> = (0..config.trees)
            .into_par_iter()
            .map(|index| {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(index as u64));
                DecisionTree::fit(features, &y, classes.len(), config, &mut rng)
            })
            .collect();

        Self { trees, classes }
    }

    /// Majority-vote prediction for one feature row.
    #[must_use]
    pub fn predict(&self, row: &[f64]) -> &str {
        let mut votes = vec![0usize; self.classes.len()];
        for tree in &self.trees {
            votes[tree.predict(row)] += 1;
        }
        &self.classes[majority(&votes)]
    }

    /// Distinct class labels the ensemble can emit, sorted.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<String>) {
        // Short low-intensity sessions are yoga, long high-intensity
        // ones are running
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..8 {
            features.push(vec![15.0 + f64::from(i), 0.0, 1.0]);
            labels.push("Yoga".to_owned());
            features.push(vec![60.0 + f64::from(i), 1.0, 0.0]);
            labels.push("Running".to_owned());
        }
        (features, labels)
    }

    fn small_config() -> RandomForestConfig {
        RandomForestConfig {
            trees: 25,
            ..RandomForestConfig::default()
        }
    }

    #[test]
    fn learns_a_separable_boundary() {
        let (features, labels) = separable_data();
        let forest = RandomForest::fit(&features, &labels, &small_config());
        assert_eq!(forest.predict(&[18.0, 0.0, 1.0]), "Yoga");
        assert_eq!(forest.predict(&[65.0, 1.0, 0.0]), "Running");
    }

    #[test]
    fn fit_is_deterministic_for_a_fixed_seed() {
        let (features, labels) = separable_data();
        let first = RandomForest::fit(&features, &labels, &small_config());
        let second = RandomForest::fit(&features, &labels, &small_config());
        for duration in [10, 25, 40, 55, 70, 90] {
            let row = [f64::from(duration), 1.0, 0.0];
            assert_eq!(first.predict(&row), second.predict(&row));
        }
    }

    #[test]
    fn single_class_data_always_predicts_that_class() {
        let features = vec![vec![30.0, 1.0]; 12];
        let labels = vec!["Swimming".to_owned(); 12];
        let forest = RandomForest::fit(&features, &labels, &small_config());
        assert_eq!(forest.predict(&[99.0, 0.0]), "Swimming");
        assert_eq!(forest.classes(), ["Swimming"]);
    }

    #[test]
    fn classes_are_sorted_and_deduplicated() {
        let features = vec![
            vec![10.0, 1.0],
            vec![20.0, 0.0],
            vec![30.0, 1.0],
            vec![40.0, 0.0],
        ];
        let labels = vec![
            "Swim".to_owned(),
            "Run".to_owned(),
            "Swim".to_owned(),
            "Cycle".to_owned(),
        ];
        let forest = RandomForest::fit(&features, &labels, &small_config());
        assert_eq!(forest.classes(), ["Cycle", "Run", "Swim"]);
    }
}
