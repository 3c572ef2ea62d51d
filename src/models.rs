// ABOUTME: Core data structures for workout log entries
// ABOUTME: Defines the persisted log model, intensity enumeration, and update descriptor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Subjective intensity of a recorded session.
///
/// Persisted as TEXT; parsing is case-insensitive but only these three
/// levels exist. Anything else fails validation at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Intensity {
    /// Easy, conversational effort
    Low,
    /// Sustained, moderately hard effort
    Medium,
    /// Near-maximal effort
    High,
}

impl Intensity {
    /// All levels, low to high.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Canonical string form, matching the persisted representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::UnknownIntensity {
                value: s.to_owned(),
            }),
        }
    }
}

/// One recorded workout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutLog {
    /// Store-assigned identifier, never reused or mutated
    pub id: i64,
    /// Calendar date of the session
    pub date: NaiveDate,
    /// Activity label; this is the prediction target
    pub activity: String,
    /// Session length in minutes
    pub duration_minutes: i64,
    /// Subjective intensity level
    pub intensity: Intensity,
}

/// Field values for creating a log entry.
///
/// All four fields are required; the store validates them before writing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkoutLog {
    /// Calendar date of the session
    pub date: NaiveDate,
    /// Activity label
    pub activity: String,
    /// Session length in minutes, must be positive
    pub duration_minutes: i64,
    /// Subjective intensity level
    pub intensity: Intensity,
}

impl NewWorkoutLog {
    /// Check the creation-side field constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a blank activity or a
    /// non-positive duration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.activity.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "activity" });
        }
        if self.duration_minutes <= 0 {
            return Err(ValidationError::NonPositiveDuration {
                value: self.duration_minutes,
            });
        }
        Ok(())
    }
}

/// Partial update for a log entry: only the supplied fields change.
///
/// An update carrying no fields is rejected rather than silently turned
/// into a malformed statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutLogUpdate {
    /// Replacement date, if any
    pub date: Option<NaiveDate>,
    /// Replacement activity label, if any
    pub activity: Option<String>,
    /// Replacement duration, if any
    pub duration_minutes: Option<i64>,
    /// Replacement intensity, if any
    pub intensity: Option<Intensity>,
}

impl WorkoutLogUpdate {
    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.activity.is_none()
            && self.duration_minutes.is_none()
            && self.intensity.is_none()
    }

    /// Supplied values obey the same constraints as at creation.
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ref activity) = self.activity {
            if activity.trim().is_empty() {
                return Err(ValidationError::MissingField { field: "activity" });
            }
        }
        if let Some(value) = self.duration_minutes {
            if value <= 0 {
                return Err(ValidationError::NonPositiveDuration { value });
            }
        }
        Ok(())
    }
}
