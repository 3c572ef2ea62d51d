// ABOUTME: Main library entry point for the fitlog workout platform
// ABOUTME: Exposes the log store, analytics queries, and recommendation engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

#![deny(unsafe_code)]

//! # Fitlog
//!
//! A workout log store with an activity recommendation engine. The crate
//! persists activity sessions to SQLite, answers descriptive and
//! frequency queries over them, and trains a fresh decision-tree
//! ensemble from the current snapshot to predict a likely activity for a
//! caller-supplied feature vector.
//!
//! ## Architecture
//!
//! - **Models**: the persisted log entry, its intensity enumeration, and
//!   the partial-update descriptor
//! - **Database**: pooled SQLite storage with CRUD and read-only
//!   analytics, one scoped unit of work per operation
//! - **Intelligence**: deterministic feature encoding with an explicit
//!   schema, a seeded random forest, and the retrain-per-request engine
//! - **Config/Logging**: environment-driven configuration and `tracing`
//!   setup for embedding processes
//!
//! Transport layers (HTTP, CLI) live outside this crate; they call the
//! typed surface below and translate outcomes themselves.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitlog::{Database, Intensity, NewWorkoutLog, RecommendationEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let database = Database::new("sqlite:fitlog.db").await?;
//!
//!     database
//!         .create_log(&NewWorkoutLog {
//!             date: "2024-01-01".parse()?,
//!             activity: "Running".into(),
//!             duration_minutes: 30,
//!             intensity: Intensity::High,
//!         })
//!         .await?;
//!
//!     let engine = RecommendationEngine::new(database);
//!     let schema = engine.feature_schema().await?;
//!     println!("feature space: {:?}", schema.columns());
//!     Ok(())
//! }
//! ```

/// Environment-driven runtime configuration
pub mod config;

/// Defaults and environment lookups
pub mod constants;

/// SQLite-backed log store with CRUD and analytics
pub mod database;

/// Typed error taxonomy
pub mod errors;

/// Feature encoding, the seeded ensemble, and the recommendation engine
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Core data structures
pub mod models;

pub use config::{AppConfig, LogLevel, RecommendationConfig};
pub use database::{ActivityFrequency, ColumnSummary, Database, LogSummary};
pub use errors::{
    EncodingError, EngineError, EngineResult, StoreError, StoreResult, ValidationError,
};
pub use intelligence::{FeatureSchema, Recommendation, RecommendationEngine};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use models::{Intensity, NewWorkoutLog, WorkoutLog, WorkoutLogUpdate};
