// ABOUTME: Integration tests for telemetry polling and JSON loading
// ABOUTME: Uses an in-memory source that becomes populated after N attempts and temp files on disk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tempfile::NamedTempFile;
use workout_reconcile::errors::{AppError, AppResult, ErrorCode};
use workout_reconcile::fetch::{
    load_json, poll_for_telemetry, FileTelemetrySource, PollConfig, PollOutcome, TelemetrySource,
};
use workout_reconcile::models::{CompletedWorkout, PlannedWorkout};

/// Answers with an unpopulated payload until `ready_on` attempts have been made
struct CountingSource {
    ready_on: u32,
    calls: AtomicU32,
}

impl CountingSource {
    const fn new(ready_on: u32) -> Self {
        Self {
            ready_on,
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TelemetrySource for CountingSource {
    async fn fetch_completed(&self, _workout_id: &str) -> AppResult<Option<CompletedWorkout>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let mut workout = CompletedWorkout::new("run");
        if call >= self.ready_on {
            workout.samples = Some(json!([{"time": 0, "hr": 120}]));
        }
        Ok(Some(workout))
    }
}

struct FailingSource;

#[async_trait]
impl TelemetrySource for FailingSource {
    async fn fetch_completed(&self, workout_id: &str) -> AppResult<Option<CompletedWorkout>> {
        Err(AppError::external_service("activity store", format!("{workout_id} unavailable")))
    }
}

fn fast_polling(max_attempts: u32) -> PollConfig {
    PollConfig {
        max_attempts,
        initial_delay: Duration::from_millis(1),
        backoff_multiplier: 1.5,
    }
}

#[tokio::test]
async fn test_ready_on_second_attempt() {
    let source = CountingSource::new(2);
    let outcome = poll_for_telemetry(&source, "w-1", &fast_polling(3))
        .await
        .unwrap();
    assert!(matches!(outcome, PollOutcome::Ready(ref workout) if workout.is_populated()));
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_still_computing_after_attempts_run_out() {
    let source = CountingSource::new(10);
    let outcome = poll_for_telemetry(&source, "w-2", &fast_polling(3))
        .await
        .unwrap();
    assert_eq!(outcome, PollOutcome::StillComputing);
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn test_zero_attempts_is_a_config_error() {
    let source = CountingSource::new(1);
    let error = poll_for_telemetry(&source, "w-3", &fast_polling(0))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_fetch_errors_propagate() {
    let error = poll_for_telemetry(&FailingSource, "w-4", &fast_polling(3))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[test]
fn test_backoff_grows_by_multiplier() {
    let config = PollConfig::default();
    assert_eq!(config.delay_after(1), Duration::from_secs(2));
    assert_eq!(config.delay_after(2), Duration::from_secs(3));
    assert_eq!(config.delay_after(3), Duration::from_millis(4500));
}

#[tokio::test]
async fn test_file_source_treats_empty_file_as_pending() {
    let file = NamedTempFile::new().unwrap();
    let source = FileTelemetrySource::new(file.path());
    assert_eq!(source.fetch_completed("w-5").await.unwrap(), None);

    let missing = FileTelemetrySource::new(file.path().with_extension("missing"));
    assert_eq!(missing.fetch_completed("w-5").await.unwrap(), None);
}

#[tokio::test]
async fn test_file_source_parses_payload() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        json!({"sport": "swim", "poolLength": 25, "poolLengthUnit": "yards"})
    )
    .unwrap();
    let workout = FileTelemetrySource::new(file.path())
        .fetch_completed("w-6")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(workout.sport, "swim");
    assert_eq!(workout.pool_length, Some(25.0));
}

#[tokio::test]
async fn test_load_json_reports_bad_documents() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{\"steps\": [").unwrap();
    let error = load_json::<PlannedWorkout>(file.path()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidFormat);

    let missing = file.path().with_extension("absent");
    let error = load_json::<PlannedWorkout>(&missing).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}
