// ABOUTME: Feature engineering and the snapshot-trained classifier
// ABOUTME: Wires the encoder, the decision-tree ensemble, and the recommendation engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

//! # Intelligence
//!
//! Everything between a snapshot of log rows and a predicted activity:
//! deterministic feature encoding, a seeded decision-tree ensemble, and
//! the engine that ties them to the store.

pub mod feature_engineering;
pub mod random_forest;
pub mod recommendation_engine;

pub use feature_engineering::{encode_snapshot, FeatureSchema, TrainingData, FEATURE_SCHEMA_VERSION};
pub use random_forest::{RandomForest, RandomForestConfig};
pub use recommendation_engine::{Recommendation, RecommendationEngine};
