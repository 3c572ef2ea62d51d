// ABOUTME: Integration tests for the recommendation engine and its contracts
// ABOUTME: Covers the training threshold, reproducibility, shape checks, and the full flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Fitlog Project

mod common;

use common::{create_test_database, entry, seed_alternating};
use fitlog::{
    EncodingError, EngineError, Intensity, Recommendation, RecommendationConfig,
    RecommendationEngine,
};

/// Smaller ensemble to keep the suite quick; everything else is default
fn test_config() -> RecommendationConfig {
    RecommendationConfig {
        forest_size: 25,
        ..RecommendationConfig::default()
    }
}

#[tokio::test]
async fn below_threshold_returns_insufficient_data() {
    let db = create_test_database().await.unwrap();
    seed_alternating(&db, &["Running", "Yoga"], 9).await.unwrap();

    let engine = RecommendationEngine::with_config(db, test_config());
    let outcome = engine.recommend_activity(&[30.0, 1.0, 0.0]).await.unwrap();
    assert_eq!(
        outcome,
        Recommendation::InsufficientData {
            rows: 9,
            required: 10,
        }
    );
}

#[tokio::test]
async fn empty_store_is_also_insufficient_not_an_error() {
    let db = create_test_database().await.unwrap();
    let engine = RecommendationEngine::with_config(db, test_config());
    let outcome = engine.recommend_activity(&[]).await.unwrap();
    assert!(matches!(
        outcome,
        Recommendation::InsufficientData { rows: 0, .. }
    ));
}

#[tokio::test]
async fn repeated_calls_over_an_unchanged_snapshot_agree() {
    let db = create_test_database().await.unwrap();
    seed_alternating(&db, &["Running", "Yoga", "Swimming"], 12)
        .await
        .unwrap();

    let engine = RecommendationEngine::with_config(db, test_config());
    let input = [45.0, 1.0, 0.0];

    let first = engine.recommend_activity(&input).await.unwrap();
    let second = engine.recommend_activity(&input).await.unwrap();
    assert_eq!(first, second);
    assert!(matches!(first, Recommendation::Activity { .. }));
}

#[tokio::test]
async fn mismatched_input_shape_is_rejected() {
    let db = create_test_database().await.unwrap();
    // Low/High alternation: the feature space is duration + 2 indicators
    seed_alternating(&db, &["Running", "Yoga"], 10).await.unwrap();

    let engine = RecommendationEngine::with_config(db, test_config());
    let err = engine.recommend_activity(&[30.0, 1.0]).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::ShapeMismatch {
            expected: 3,
            actual: 2,
        }
    ));
}

#[tokio::test]
async fn schema_exposes_the_snapshot_feature_space() {
    let db = create_test_database().await.unwrap();
    seed_alternating(&db, &["Running", "Yoga"], 10).await.unwrap();

    let engine = RecommendationEngine::with_config(db, test_config());
    let schema = engine.feature_schema().await.unwrap();
    assert_eq!(
        schema.columns(),
        ["duration_minutes", "intensity_High", "intensity_Low"]
    );
    assert!(schema.validate_input(&[30.0, 0.0, 1.0]).is_ok());
}

#[tokio::test]
async fn schema_of_an_empty_store_is_an_encoding_error() {
    let db = create_test_database().await.unwrap();
    let engine = RecommendationEngine::with_config(db, test_config());
    let err = engine.feature_schema().await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Encoding(EncodingError::EmptySnapshot)
    ));
}

#[tokio::test]
async fn prediction_label_comes_from_the_stored_activities() {
    let db = create_test_database().await.unwrap();

    // Ten entries alternating Low/High with durations 10..100
    let activities = ["Running", "Yoga"];
    seed_alternating(&db, &activities, 10).await.unwrap();

    // Descriptive check on the same snapshot
    let summary = db.summarize_logs().await.unwrap();
    assert_eq!(summary.count, 10);
    let duration = summary.duration_minutes.unwrap();
    assert!((duration.min - 10.0).abs() < f64::EPSILON);
    assert!((duration.max - 100.0).abs() < f64::EPSILON);

    let engine = RecommendationEngine::with_config(db, test_config());
    let outcome = engine.recommend_activity(&[30.0, 0.0, 1.0]).await.unwrap();
    match outcome {
        Recommendation::Activity { label, schema } => {
            assert!(activities.contains(&label.as_str()));
            assert_eq!(schema.width(), 3);
        }
        Recommendation::InsufficientData { .. } => {
            panic!("ten rows must clear the training threshold")
        }
    }
}

#[test]
fn outcomes_serialize_for_transport_callers() {
    let outcome = Recommendation::InsufficientData {
        rows: 3,
        required: 10,
    };
    let json = serde_json::to_string(&outcome).unwrap();
    assert!(json.contains("InsufficientData"));
}

#[tokio::test]
async fn snapshot_growth_changes_the_feature_space() {
    let db = create_test_database().await.unwrap();
    seed_alternating(&db, &["Running", "Yoga"], 10).await.unwrap();

    let engine = RecommendationEngine::with_config(db.clone(), test_config());
    assert_eq!(engine.feature_schema().await.unwrap().width(), 3);

    // A Medium entry widens the space; old input vectors stop conforming
    db.create_log(&entry("2024-02-01", "Rowing", 35, Intensity::Medium))
        .await
        .unwrap();

    let schema = engine.feature_schema().await.unwrap();
    assert_eq!(schema.width(), 4);
    assert_eq!(
        schema.columns(),
        [
            "duration_minutes",
            "intensity_High",
            "intensity_Low",
            "intensity_Medium"
        ]
    );

    let err = engine.recommend_activity(&[30.0, 0.0, 1.0]).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::ShapeMismatch {
            expected: 4,
            actual: 3,
        }
    ));
}
