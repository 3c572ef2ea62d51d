// ABOUTME: Read-only analytics over the workout log table
// ABOUTME: Produces descriptive summaries and frequency rankings of activities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

use serde::{Deserialize, Serialize};
use sqlx::Row;
use std::str::FromStr;

use super::Database;
use crate::constants::defaults;
use crate::errors::{StoreError, StoreResult};
use crate::models::Intensity;

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Rows contributing to the column
    pub count: u64,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation; 0.0 when only one row exists
    pub std: f64,
    /// Smallest value
    pub min: f64,
    /// Lower quartile, linearly interpolated
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Upper quartile, linearly interpolated
    pub q3: f64,
    /// Largest value
    pub max: f64,
}

/// Snapshot-wide descriptive summary.
///
/// Statistics are reported for both numeric columns; callers typically
/// discard the `id` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    /// Total rows in the store
    pub count: u64,
    /// Statistics over the id column, absent when the store is empty
    pub id: Option<ColumnSummary>,
    /// Statistics over session durations, absent when the store is empty
    pub duration_minutes: Option<ColumnSummary>,
}

/// One (activity, intensity) group with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFrequency {
    /// Activity label
    pub activity: String,
    /// Intensity level of the group
    pub intensity: Intensity,
    /// How many log entries fall in the group
    pub count: i64,
}

#[allow(clippy::cast_precision_loss)] // Row counts are far below 2^52
fn describe(values: &[f64]) -> Option<ColumnSummary> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = if values.len() < 2 {
        0.0
    } else {
        let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        (sum_sq / (n - 1.0)).sqrt()
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(ColumnSummary {
        count: values.len() as u64,
        mean,
        std,
        min: sorted[0],
        q1: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.5),
        q3: percentile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// Linear-interpolation percentile over pre-sorted values.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let position = fraction * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = position - lower as f64;
        sorted[lower].mul_add(1.0 - weight, sorted[upper] * weight)
    }
}

impl Database {
    /// Descriptive statistics over the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the read fails.
    #[allow(clippy::cast_precision_loss)] // Ids and minutes fit f64 exactly at this scale
    pub async fn summarize_logs(&self) -> StoreResult<LogSummary> {
        let rows = sqlx::query("SELECT id, duration_minutes FROM workout_logs ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::storage("read summary columns", e))?;

        let mut ids = Vec::with_capacity(rows.len());
        let mut durations = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: i64 = row
                .try_get("id")
                .map_err(|e| StoreError::storage("decode summary id", e))?;
            let duration: i64 = row
                .try_get("duration_minutes")
                .map_err(|e| StoreError::storage("decode summary duration", e))?;
            ids.push(id as f64);
            durations.push(duration as f64);
        }

        Ok(LogSummary {
            count: rows.len() as u64,
            id: describe(&ids),
            duration_minutes: describe(&durations),
        })
    }

    /// Most frequent (activity, intensity) pairs, most popular first.
    ///
    /// Ties are broken by first appearance in the log (lowest first id),
    /// which keeps the ranking stable across calls. Passing `None` uses
    /// the standard limit of 3.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the read fails, or
    /// [`StoreError::CorruptRow`] for a group outside the data model.
    pub async fn top_activities(&self, limit: Option<i64>) -> StoreResult<Vec<ActivityFrequency>> {
        let limit = limit.unwrap_or(defaults::TOP_ACTIVITIES_LIMIT);

        let rows = sqlx::query(
            r"
            SELECT activity, intensity, COUNT(*) AS frequency, MIN(id) AS first_id
            FROM workout_logs
            GROUP BY activity, intensity
            ORDER BY frequency DESC, first_id ASC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::storage("rank activities", e))?;

        let mut ranking = Vec::with_capacity(rows.len());
        for row in rows {
            let activity: String = row
                .try_get("activity")
                .map_err(|e| StoreError::storage("decode ranked activity", e))?;
            let intensity_raw: String = row
                .try_get("intensity")
                .map_err(|e| StoreError::storage("decode ranked intensity", e))?;
            let count: i64 = row
                .try_get("frequency")
                .map_err(|e| StoreError::storage("decode ranked frequency", e))?;
            let first_id: i64 = row
                .try_get("first_id")
                .map_err(|e| StoreError::storage("decode ranked first id", e))?;

            let intensity =
                Intensity::from_str(&intensity_raw).map_err(|_| StoreError::CorruptRow {
                    id: first_id,
                    value: intensity_raw,
                })?;

            ranking.push(ActivityFrequency {
                activity,
                intensity,
                count,
            });
        }

        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_matches_known_statistics() {
        let summary = describe(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        assert_eq!(summary.count, 4);
        assert!((summary.mean - 25.0).abs() < f64::EPSILON);
        assert!((summary.std - 12.909_944_487_358_056).abs() < 1e-9);
        assert!((summary.min - 10.0).abs() < f64::EPSILON);
        assert!((summary.q1 - 17.5).abs() < f64::EPSILON);
        assert!((summary.median - 25.0).abs() < f64::EPSILON);
        assert!((summary.q3 - 32.5).abs() < f64::EPSILON);
        assert!((summary.max - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn describe_single_value_has_zero_std() {
        let summary = describe(&[42.0]).unwrap();
        assert!((summary.std - 0.0).abs() < f64::EPSILON);
        assert!((summary.median - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn describe_empty_is_absent() {
        assert!(describe(&[]).is_none());
    }

    #[test]
    fn percentile_interpolates_between_points() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((percentile(&sorted, 0.5) - 3.0).abs() < f64::EPSILON);
        assert!((percentile(&sorted, 0.25) - 2.0).abs() < f64::EPSILON);
        assert!((percentile(&sorted, 0.1) - 1.4).abs() < 1e-12);
    }
}
