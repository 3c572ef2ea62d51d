// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database creation, quiet logging, and log-entry helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

#![allow(dead_code)]

use std::sync::Once;

use chrono::NaiveDate;
use fitlog::{Database, Intensity, NewWorkoutLog, StoreResult};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls verbosity; default to WARN for quiet runs
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> StoreResult<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Build a creation payload from literal test values
pub fn entry(date: &str, activity: &str, duration_minutes: i64, intensity: Intensity) -> NewWorkoutLog {
    NewWorkoutLog {
        date: date.parse::<NaiveDate>().expect("valid test date"),
        activity: activity.to_owned(),
        duration_minutes,
        intensity,
    }
}

/// Seed `count` entries alternating Low/High intensity with durations
/// 10, 20, ... minutes, cycling through the given activities
pub async fn seed_alternating(
    db: &Database,
    activities: &[&str],
    count: usize,
) -> StoreResult<Vec<i64>> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let intensity = if i % 2 == 0 {
            Intensity::Low
        } else {
            Intensity::High
        };
        let day = i % 27 + 1;
        let new_log = entry(
            &format!("2024-01-{day:02}"),
            activities[i % activities.len()],
            (i as i64 + 1) * 10,
            intensity,
        );
        ids.push(db.create_log(&new_log).await?);
    }
    Ok(ids)
}
