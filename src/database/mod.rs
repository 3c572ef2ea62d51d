// ABOUTME: SQLite-backed storage for workout log entries
// ABOUTME: Owns the connection pool, schema migration, and module wiring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

//! # Log Store
//!
//! This module provides the persistence layer for workout log entries.
//! Every operation is one scoped unit of work: a connection is acquired
//! from the pool, the statement runs, and the connection is released on
//! all exit paths, including errors.

mod analytics;
mod workout_logs;

pub use analytics::{ActivityFrequency, ColumnSummary, LogSummary};

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::time::Duration;
use tracing::debug;

use crate::constants::defaults;
use crate::errors::{StoreError, StoreResult};

/// Handle over the workout log store.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open the store at `database_url`, creating it if needed, and run
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] when the database cannot be
    /// reached or migrated.
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        Self::with_timeout(
            database_url,
            Duration::from_secs(defaults::ACQUIRE_TIMEOUT_SECS),
        )
        .await
    }

    /// Open the store with an explicit bound on waiting for a pooled
    /// connection. Expiry of the bound surfaces as
    /// [`StoreError::Storage`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] when the database cannot be
    /// reached or migrated.
    pub async fn with_timeout(
        database_url: &str,
        acquire_timeout: Duration,
    ) -> StoreResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(acquire_timeout);
        // A `:memory:` target is per-connection state; the pool must not
        // open a second connection or it would see an empty database
        if connection_options.contains(":memory:") {
            pool_options = pool_options.max_connections(1);
        }

        let pool = pool_options
            .connect(&connection_options)
            .await
            .map_err(|e| StoreError::storage("connect to database", e))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the pool for advanced operations.
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Create the log table and its index.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if a migration statement fails.
    pub async fn migrate(&self) -> StoreResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::storage("begin migration", e))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                activity TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                intensity TEXT NOT NULL
            )
            ",
        )
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::storage("create workout_logs table", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_logs_activity
             ON workout_logs(activity, intensity)",
        )
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::storage("create workout_logs index", e))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::storage("commit migration", e))?;

        debug!("workout log schema ready");
        Ok(())
    }
}
