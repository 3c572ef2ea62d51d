// ABOUTME: Environment-based runtime configuration for embedding processes
// ABOUTME: Parses database, logging, and recommendation tunables with typed defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

//! Environment-driven configuration management

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{defaults, env_config};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Directive string understood by `tracing_subscriber`'s env filter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

/// Tunables for the recommendation engine.
///
/// The defaults reproduce the historical behavior: 100 trees, a fifth of
/// the snapshot held out, a fixed seed of 42, and a hard ten-row training
/// threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Trees in the ensemble
    pub forest_size: usize,
    /// Fraction of the snapshot held out from training, in (0, 1)
    pub holdout_fraction: f64,
    /// Seed driving the shuffle-and-split and per-tree RNGs
    pub split_seed: u64,
    /// Snapshot rows required before training is attempted
    pub min_training_rows: usize,
    /// Depth bound for individual trees
    pub max_depth: usize,
    /// Minimum samples a node needs before it may split
    pub min_samples_split: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            forest_size: defaults::FOREST_SIZE,
            holdout_fraction: defaults::HOLDOUT_FRACTION,
            split_seed: defaults::SPLIT_SEED,
            min_training_rows: defaults::MIN_TRAINING_ROWS,
            max_depth: defaults::MAX_TREE_DEPTH,
            min_samples_split: defaults::MIN_SAMPLES_SPLIT,
        }
    }
}

impl RecommendationConfig {
    /// Reject tunable combinations the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty ensemble or a holdout fraction
    /// outside (0, 1).
    pub fn validate(&self) -> Result<()> {
        ensure!(self.forest_size >= 1, "forest_size must be at least 1");
        ensure!(
            self.holdout_fraction > 0.0 && self.holdout_fraction < 1.0,
            "holdout_fraction must be within (0, 1), got {}",
            self.holdout_fraction
        );
        ensure!(
            self.min_training_rows >= 2,
            "min_training_rows must leave at least one training row"
        );
        Ok(())
    }
}

/// Top-level configuration for a process embedding the crate.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection string
    pub database_url: String,
    /// Bound on waiting for a pooled connection
    pub acquire_timeout: Duration,
    /// Log level for the tracing subscriber
    pub log_level: LogLevel,
    /// Engine tunables
    pub recommendation: RecommendationConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the resulting recommendation tunables are
    /// unusable (see [`RecommendationConfig::validate`]).
    pub fn from_env() -> Result<Self> {
        let recommendation = RecommendationConfig {
            forest_size: env_config::forest_size(),
            split_seed: env_config::split_seed(),
            min_training_rows: env_config::min_training_rows(),
            ..RecommendationConfig::default()
        };
        recommendation.validate()?;

        Ok(Self {
            database_url: env_config::database_url(),
            acquire_timeout: Duration::from_secs(defaults::ACQUIRE_TIMEOUT_SECS),
            log_level: LogLevel::from_str_or_default(&env_config::log_level()),
            recommendation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tunables_validate() {
        RecommendationConfig::default().validate().unwrap();
    }

    #[test]
    fn holdout_fraction_bounds_are_enforced() {
        let config = RecommendationConfig {
            holdout_fraction: 1.0,
            ..RecommendationConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RecommendationConfig {
            holdout_fraction: 0.0,
            ..RecommendationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn log_level_parses_with_fallback() {
        assert_eq!(LogLevel::from_str_or_default("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("nonsense"), LogLevel::Info);
    }
}
