// ABOUTME: CRUD operations over workout log rows
// ABOUTME: Covers creation, snapshot reads, dynamic partial updates, and deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;
use tracing::debug;

use super::Database;
use crate::errors::{StoreError, StoreResult, ValidationError};
use crate::models::{Intensity, NewWorkoutLog, WorkoutLog, WorkoutLogUpdate};

fn row_to_log(row: &SqliteRow) -> StoreResult<WorkoutLog> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| StoreError::storage("decode log id", e))?;
    let date = row
        .try_get("date")
        .map_err(|e| StoreError::storage("decode log date", e))?;
    let activity: String = row
        .try_get("activity")
        .map_err(|e| StoreError::storage("decode log activity", e))?;
    let duration_minutes: i64 = row
        .try_get("duration_minutes")
        .map_err(|e| StoreError::storage("decode log duration", e))?;
    let intensity_raw: String = row
        .try_get("intensity")
        .map_err(|e| StoreError::storage("decode log intensity", e))?;
    let intensity = Intensity::from_str(&intensity_raw).map_err(|_| StoreError::CorruptRow {
        id,
        value: intensity_raw,
    })?;

    Ok(WorkoutLog {
        id,
        date,
        activity,
        duration_minutes,
        intensity,
    })
}

impl Database {
    /// Insert a new log entry, returning its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] (wrapped) for a blank activity or
    /// non-positive duration, [`StoreError::Storage`] if the write fails.
    pub async fn create_log(&self, new_log: &NewWorkoutLog) -> StoreResult<i64> {
        new_log.validate()?;

        let result = sqlx::query(
            r"
            INSERT INTO workout_logs (date, activity, duration_minutes, intensity)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(new_log.date)
        .bind(&new_log.activity)
        .bind(new_log.duration_minutes)
        .bind(new_log.intensity.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::storage("insert workout log", e))?;

        let id = result.last_insert_rowid();
        debug!(log_id = id, activity = %new_log.activity, "created workout log");
        Ok(id)
    }

    /// All log entries, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the read fails, or
    /// [`StoreError::CorruptRow`] for a row outside the data model.
    pub async fn list_logs(&self) -> StoreResult<Vec<WorkoutLog>> {
        let rows = sqlx::query(
            "SELECT id, date, activity, duration_minutes, intensity
             FROM workout_logs ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::storage("list workout logs", e))?;

        rows.iter().map(row_to_log).collect()
    }

    /// Single entry by id, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the read fails.
    pub async fn get_log(&self, id: i64) -> StoreResult<Option<WorkoutLog>> {
        let row = sqlx::query(
            "SELECT id, date, activity, duration_minutes, intensity
             FROM workout_logs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::storage("get workout log", e))?;

        row.as_ref().map(row_to_log).transpose()
    }

    /// Apply a partial update to the entry with `id`.
    ///
    /// The SET clause contains exactly the supplied fields; nothing else
    /// changes. Returns the affected-row count: 0 means `id` does not
    /// exist, which is a no-op by design, not a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUpdate`] (wrapped) when no field
    /// is set - the update is rejected before any SQL is built - and
    /// [`StoreError::Storage`] if the write fails.
    pub async fn update_log(&self, id: i64, update: &WorkoutLogUpdate) -> StoreResult<u64> {
        if update.is_empty() {
            return Err(ValidationError::EmptyUpdate { id }.into());
        }
        update.validate()?;

        let mut assignments = Vec::new();
        if update.date.is_some() {
            assignments.push("date = ?");
        }
        if update.activity.is_some() {
            assignments.push("activity = ?");
        }
        if update.duration_minutes.is_some() {
            assignments.push("duration_minutes = ?");
        }
        if update.intensity.is_some() {
            assignments.push("intensity = ?");
        }
        let query = format!(
            "UPDATE workout_logs SET {} WHERE id = ?",
            assignments.join(", ")
        );

        let mut sql_query = sqlx::query(&query);
        if let Some(date) = update.date {
            sql_query = sql_query.bind(date);
        }
        if let Some(ref activity) = update.activity {
            sql_query = sql_query.bind(activity);
        }
        if let Some(duration) = update.duration_minutes {
            sql_query = sql_query.bind(duration);
        }
        if let Some(intensity) = update.intensity {
            sql_query = sql_query.bind(intensity.as_str());
        }

        let result = sql_query
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::storage("update workout log", e))?;

        let affected = result.rows_affected();
        debug!(log_id = id, affected, "updated workout log");
        Ok(affected)
    }

    /// Delete the entry with `id`.
    ///
    /// Returns the affected-row count: 0 means `id` does not exist,
    /// which is a no-op by design (same policy as `update_log`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write fails.
    pub async fn delete_log(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM workout_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::storage("delete workout log", e))?;

        let affected = result.rows_affected();
        debug!(log_id = id, affected, "deleted workout log");
        Ok(affected)
    }
}
