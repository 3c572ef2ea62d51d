// ABOUTME: Snapshot-trained activity recommendation engine
// ABOUTME: Gates on the training threshold, splits, trains, and predicts one label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::feature_engineering::{encode_snapshot, train_test_split, FeatureSchema};
use super::random_forest::{RandomForest, RandomForestConfig};
use crate::config::RecommendationConfig;
use crate::database::Database;
use crate::errors::{EngineError, EngineResult};

/// Outcome of a recommendation request.
///
/// `InsufficientData` is an expected business outcome, not a failure;
/// callers must treat it as a valid result variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Predicted activity plus the feature space that produced it
    Activity {
        /// Most likely activity for the supplied features
        label: String,
        /// Schema of the snapshot the model was trained on
        schema: FeatureSchema,
    },
    /// Too few rows to train; retry once the store has grown
    InsufficientData {
        /// Rows currently in the snapshot
        rows: usize,
        /// Rows required before training is attempted
        required: usize,
    },
}

/// Activity recommendation engine.
///
/// Holds a read-only handle on the log store and retrains from the full
/// snapshot on every request; no model state survives between calls.
pub struct RecommendationEngine {
    database: Database,
    config: RecommendationConfig,
}

impl RecommendationEngine {
    /// Engine with the default tunables.
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self {
            database,
            config: RecommendationConfig::default(),
        }
    }

    /// Engine with explicit tunables.
    #[must_use]
    pub const fn with_config(database: Database, config: RecommendationConfig) -> Self {
        Self { database, config }
    }

    /// Feature-space schema of the current snapshot.
    ///
    /// Lets callers validate input shape up front instead of discovering
    /// a mismatch through the prediction call.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the snapshot cannot be read and
    /// [`EngineError::Encoding`] when the store is empty.
    pub async fn feature_schema(&self) -> EngineResult<FeatureSchema> {
        let logs = self.database.list_logs().await?;
        Ok(FeatureSchema::from_snapshot(&logs)?)
    }

    /// Predict the most likely activity for `input_features`.
    ///
    /// Below the training threshold this returns
    /// [`Recommendation::InsufficientData`] without encoding, splitting,
    /// or training. Otherwise the snapshot is encoded, deterministically
    /// partitioned (the holdout side is reserved for future evaluation),
    /// and a fresh ensemble is trained on the training side only.
    ///
    /// Training runs on the blocking pool; a caller that drops the
    /// future abandons the computation and no partial model state is
    /// ever observable.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShapeMismatch`] when `input_features` does
    /// not match the snapshot-derived feature space, plus the read and
    /// encoding errors of [`Self::feature_schema`].
    pub async fn recommend_activity(&self, input_features: &[f64]) -> EngineResult<Recommendation> {
        let logs = self.database.list_logs().await?;
        if logs.len() < self.config.min_training_rows {
            debug!(
                rows = logs.len(),
                required = self.config.min_training_rows,
                "snapshot below training threshold"
            );
            return Ok(Recommendation::InsufficientData {
                rows: logs.len(),
                required: self.config.min_training_rows,
            });
        }

        let data = encode_snapshot(&logs)?;
        data.schema.validate_input(input_features)?;

        let split = train_test_split(&data, self.config.holdout_fraction, self.config.split_seed);
        debug!(
            train_rows = split.train_features.len(),
            holdout_rows = split.holdout_features.len(),
            columns = data.schema.width(),
            "partitioned snapshot for training"
        );

        let forest_config = RandomForestConfig {
            trees: self.config.forest_size,
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            seed: self.config.split_seed,
        };
        let train_features = split.train_features;
        let train_labels = split.train_labels;
        let input = input_features.to_vec();

        let label = tokio::task::spawn_blocking(move || {
            let forest = RandomForest::fit(&train_features, &train_labels, &forest_config);
            forest.predict(&input).to_owned()
        })
        .await
        .map_err(|source| EngineError::Training { source })?;

        debug!(%label, "trained snapshot model and predicted");
        Ok(Recommendation::Activity {
            label,
            schema: data.schema,
        })
    }
}
