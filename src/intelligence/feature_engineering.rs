// ABOUTME: Deterministic snapshot-to-feature-matrix encoding for training
// ABOUTME: Defines the explicit feature schema and the reproducible train/holdout split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{EncodingError, EngineError, EngineResult};
use crate::models::{Intensity, WorkoutLog};

/// Version of the encoding rules a schema was produced under.
pub const FEATURE_SCHEMA_VERSION: u32 = 1;

/// Explicit description of the feature space derived from a snapshot.
///
/// Columns are `duration_minutes` followed by one indicator per intensity
/// level *observed in the snapshot*, ordered by level name. Because the
/// indicator set depends on the data, a schema is only valid for the
/// snapshot it was derived from; callers should fetch it and validate
/// their input shape before requesting a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    version: u32,
    columns: Vec<String>,
    intensity_levels: Vec<Intensity>,
}

impl FeatureSchema {
    /// Derive the schema for a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::EmptySnapshot`] when there are no rows.
    pub fn from_snapshot(logs: &[WorkoutLog]) -> Result<Self, EncodingError> {
        if logs.is_empty() {
            return Err(EncodingError::EmptySnapshot);
        }

        let mut intensity_levels: Vec<Intensity> = logs.iter().map(|log| log.intensity).collect();
        intensity_levels.sort_by_key(|level| level.as_str());
        intensity_levels.dedup();

        let mut columns = vec!["duration_minutes".to_owned()];
        columns.extend(
            intensity_levels
                .iter()
                .map(|level| format!("intensity_{level}")),
        );

        Ok(Self {
            version: FEATURE_SCHEMA_VERSION,
            columns,
            intensity_levels,
        })
    }

    /// Encoder version these columns were produced under.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Ordered column names of the feature space.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns a conforming input vector must have.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Intensity levels observed in the snapshot, in column order.
    #[must_use]
    pub fn intensity_levels(&self) -> &[Intensity] {
        &self.intensity_levels
    }

    /// Check an input vector against this feature space.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShapeMismatch`] on a length mismatch.
    pub fn validate_input(&self, input: &[f64]) -> EngineResult<()> {
        if input.len() != self.width() {
            return Err(EngineError::ShapeMismatch {
                expected: self.width(),
                actual: input.len(),
            });
        }
        Ok(())
    }

    /// Encode one log row into this feature space.
    #[allow(clippy::cast_precision_loss)] // Minutes fit f64 exactly at this scale
    fn encode_row(&self, log: &WorkoutLog) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.width());
        row.push(log.duration_minutes as f64);
        for level in &self.intensity_levels {
            row.push(if *level == log.intensity { 1.0 } else { 0.0 });
        }
        row
    }
}

/// Feature matrix with its aligned labels and the schema that shaped it.
#[derive(Debug, Clone)]
pub struct TrainingData {
    /// One feature row per snapshot row
    pub features: Vec<Vec<f64>>,
    /// Activity labels, index-aligned with `features`
    pub labels: Vec<String>,
    /// Feature-space description
    pub schema: FeatureSchema,
}

/// Encode a snapshot into a feature matrix, aligned labels, and schema.
///
/// `id` and `date` are dropped entirely: they carry no generalizable
/// signal. `activity` becomes the label sequence.
///
/// # Errors
///
/// Returns [`EncodingError::EmptySnapshot`] when there are no rows.
pub fn encode_snapshot(logs: &[WorkoutLog]) -> Result<TrainingData, EncodingError> {
    let schema = FeatureSchema::from_snapshot(logs)?;
    let features = logs.iter().map(|log| schema.encode_row(log)).collect();
    let labels = logs.iter().map(|log| log.activity.clone()).collect();

    Ok(TrainingData {
        features,
        labels,
        schema,
    })
}

/// Training and holdout partitions of an encoded snapshot.
pub(crate) struct Split {
    pub train_features: Vec<Vec<f64>>,
    pub train_labels: Vec<String>,
    // Held out for future accuracy evaluation; the prediction path does
    // not consume these
    #[allow(dead_code)]
    pub holdout_features: Vec<Vec<f64>>,
    #[allow(dead_code)]
    pub holdout_labels: Vec<String>,
}

/// Deterministically partition encoded rows into training and holdout
/// subsets.
///
/// The same seed over the same input yields a bit-identical split, which
/// is what makes repeated recommendations over an unchanged snapshot
/// reproducible. The holdout size rounds up, and the training side always
/// keeps at least one row.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn train_test_split(data: &TrainingData, holdout_fraction: f64, seed: u64) -> Split {
    let total = data.features.len();
    let mut indices: Vec<usize> = (0..total).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let holdout_len = ((total as f64) * holdout_fraction).ceil() as usize;
    let holdout_len = holdout_len.min(total.saturating_sub(1));
    let (holdout_idx, train_idx) = indices.split_at(holdout_len);

    Split {
        train_features: train_idx.iter().map(|&i| data.features[i].clone()).collect(),
        train_labels: train_idx.iter().map(|&i| data.labels[i].clone()).collect(),
        holdout_features: holdout_idx
            .iter()
            .map(|&i| data.features[i].clone())
            .collect(),
        holdout_labels: holdout_idx.iter().map(|&i| data.labels[i].clone()).collect(),
    }
}
