// ABOUTME: System-wide constants and environment-based configuration values
// ABOUTME: Contains storage defaults, engine tunables, and environment lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

//! # Constants Module
//!
//! Hardcoded defaults plus the environment variable lookups that override
//! them. Runtime configuration assembles these into [`crate::config::AppConfig`].

use std::env;

/// Default values for storage and engine configuration
pub mod defaults {
    /// Database location used when `DATABASE_URL` is unset
    pub const DATABASE_URL: &str = "sqlite:fitlog.db";

    /// Bound on waiting for a pooled connection, in seconds
    pub const ACQUIRE_TIMEOUT_SECS: u64 = 5;

    /// Rows returned by the popularity ranking when no limit is given
    pub const TOP_ACTIVITIES_LIMIT: i64 = 3;

    /// Snapshot rows required before training is attempted
    pub const MIN_TRAINING_ROWS: usize = 10;

    /// Trees in the recommendation ensemble
    pub const FOREST_SIZE: usize = 100;

    /// Fraction of the snapshot held out from training
    pub const HOLDOUT_FRACTION: f64 = 0.2;

    /// Seed for the reproducible shuffle-and-split and tree derivation
    pub const SPLIT_SEED: u64 = 42;

    /// Depth bound for individual trees
    pub const MAX_TREE_DEPTH: usize = 16;

    /// Minimum samples a node needs before it may split
    pub const MIN_SAMPLES_SPLIT: usize = 2;
}

/// Environment-based configuration lookups
pub mod env_config {
    use super::defaults;
    use super::env;

    /// Database URL from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DATABASE_URL.into())
    }

    /// Log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into())
    }

    /// Ensemble size from environment or default
    #[must_use]
    pub fn forest_size() -> usize {
        env::var("FITLOG_FOREST_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::FOREST_SIZE)
    }

    /// Split seed from environment or default
    #[must_use]
    pub fn split_seed() -> u64 {
        env::var("FITLOG_SPLIT_SEED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::SPLIT_SEED)
    }

    /// Training threshold from environment or default
    #[must_use]
    pub fn min_training_rows() -> usize {
        env::var("FITLOG_MIN_TRAINING_ROWS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::MIN_TRAINING_ROWS)
    }
}
