// ABOUTME: Typed error taxonomy for the log store and recommendation engine
// ABOUTME: Defines validation, storage, encoding, and engine error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

//! # Error Types
//!
//! Every fallible operation in the crate returns one of the typed errors
//! below; the library never formats transport-level responses. Callers
//! translate these into whatever signal their transport uses.
//!
//! An undersized training snapshot is *not* an error: it is an expected
//! outcome and is returned as a
//! [`Recommendation::InsufficientData`](crate::intelligence::Recommendation)
//! value instead.

use thiserror::Error;

/// Validation failures for caller-supplied field values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was missing or blank
    #[error("missing required field '{field}'")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Durations are whole positive minutes
    #[error("duration must be positive, got {value}")]
    NonPositiveDuration {
        /// The rejected value
        value: i64,
    },

    /// Intensity outside the enumerated set
    #[error("unknown intensity '{value}', expected one of Low, Medium, High")]
    UnknownIntensity {
        /// The rejected value
        value: String,
    },

    /// A partial update must name at least one field to change
    #[error("update of log {id} specifies no fields to change")]
    EmptyUpdate {
        /// Target log id
        id: i64,
    },
}

/// Errors from the log store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller-supplied values failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The underlying storage failed (connection, timeout, I/O)
    #[error("storage operation failed: {context}")]
    Storage {
        /// What the store was doing when the failure occurred
        context: &'static str,
        /// Underlying sqlx error
        #[source]
        source: sqlx::Error,
    },

    /// A persisted row no longer decodes into the data model
    #[error("log {id} holds an unknown intensity value '{value}'")]
    CorruptRow {
        /// Row id
        id: i64,
        /// Offending stored value
        value: String,
    },
}

impl StoreError {
    /// Wrap an sqlx error with the operation that produced it.
    pub(crate) const fn storage(context: &'static str, source: sqlx::Error) -> Self {
        Self::Storage { context, source }
    }
}

/// Errors from feature encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// No rows to encode; distinct from the (higher) training threshold
    #[error("cannot encode features from an empty snapshot")]
    EmptySnapshot,
}

/// Errors from the recommendation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input feature vector does not match the snapshot feature space.
    ///
    /// The column set is data-dependent, so this is the contract callers
    /// are most likely to violate; fetch the schema first to avoid it.
    #[error("input feature vector has {actual} columns, snapshot feature space has {expected}")]
    ShapeMismatch {
        /// Columns the current snapshot encodes to
        expected: usize,
        /// Columns the caller supplied
        actual: usize,
    },

    /// The snapshot could not be encoded
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Reading the snapshot failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The blocking training task failed to complete
    #[error("training task failed")]
    Training {
        /// Join error from the blocking pool
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
