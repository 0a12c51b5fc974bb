// ABOUTME: Integration tests for the sample normalizer
// ABOUTME: Field priority, container shapes, time rebasing, index merge and swim-length fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{TimeZone, Utc};
use serde_json::json;
use workout_reconcile::config::SampleConfig;
use workout_reconcile::errors::ErrorCode;
use workout_reconcile::models::{CompletedWorkout, Sample};
use workout_reconcile::telemetry::normalize;

fn normalize_default(workout: &CompletedWorkout) -> Vec<Sample> {
    normalize(workout, &SampleConfig::default()).unwrap()
}

#[test]
fn test_output_sorted_and_deduplicated() {
    let workout = common::workout_with_samples(
        "run",
        json!([
            {"time": 10, "hr": 150},
            {"time": 0, "hr": 120},
            {"time": 10, "hr": 160},
            {"time": 5, "hr": 130}
        ]),
    );
    let samples = normalize_default(&workout);
    let times: Vec<f64> = samples.iter().map(|s| s.time).collect();
    assert_eq!(times, vec![0.0, 5.0, 10.0]);
    // first record at a repeated timestamp wins
    assert_eq!(samples[2].heart_rate, Some(150.0));
}

#[test]
fn test_speed_prefers_meters_per_second_over_pace() {
    let workout = common::workout_with_samples(
        "run",
        json!([
            {"time": 0, "paceSecondsPerKm": 250, "speed": 3.5},
            {"time": 1, "paceSecondsPerKm": 250},
            {"time": 2, "speedKph": 18}
        ]),
    );
    let samples = normalize_default(&workout);
    assert_eq!(samples[0].instant_speed, Some(3.5));
    assert!((samples[1].instant_speed.unwrap() - 4.0).abs() < 1e-9);
    assert!((samples[2].instant_speed.unwrap() - 5.0).abs() < 1e-9);
}

#[test]
fn test_distance_prefers_meters_then_kilometers() {
    let workout = common::workout_with_samples(
        "run",
        json!([
            {"time": 0, "distance": 120.0, "distanceKm": 0.5},
            {"time": 1, "distanceKm": 0.25}
        ]),
    );
    let samples = normalize_default(&workout);
    assert_eq!(samples[0].cumulative_distance, Some(120.0));
    assert_eq!(samples[1].cumulative_distance, Some(250.0));
}

#[test]
fn test_implausible_heart_rate_is_discarded_not_clamped() {
    let workout = common::workout_with_samples(
        "run",
        json!([
            {"time": 0, "heartRate": 250},
            {"time": 1, "heartRate": 40},
            {"time": 2, "heartRate": 41}
        ]),
    );
    let samples = normalize_default(&workout);
    assert_eq!(samples[0].heart_rate, None);
    assert_eq!(samples[1].heart_rate, None);
    assert_eq!(samples[2].heart_rate, Some(41.0));
}

#[test]
fn test_stream_columns_with_latlng_pairs() {
    let workout = common::workout_with_samples(
        "run",
        json!({
            "time": [0, 1, 2],
            "latlng": [[47.0, 8.0], [47.0001, 8.0], [47.0002, 8.0]],
            "heartrate": [120, 122, 124]
        }),
    );
    let samples = normalize_default(&workout);
    assert_eq!(samples.len(), 3);
    let position = samples[1].position.unwrap();
    assert!((position.lat - 47.0001).abs() < 1e-12);
    assert_eq!(samples[2].heart_rate, Some(124.0));
}

#[test]
fn test_absolute_timestamps_rebased_on_start_time() {
    let mut workout = common::workout_with_samples(
        "run",
        json!([
            {"timestamp": "2025-03-01T07:00:30Z", "hr": 130},
            {"timestamp": "2025-03-01T07:00:10Z", "hr": 120}
        ]),
    );
    workout.start_time = Some(Utc.with_ymd_and_hms(2025, 3, 1, 7, 0, 0).unwrap());
    let samples = normalize_default(&workout);
    let times: Vec<f64> = samples.iter().map(|s| s.time).collect();
    assert_eq!(times, vec![10.0, 30.0]);
}

#[test]
fn test_absolute_timestamps_rebased_on_earliest_without_start() {
    let workout = common::workout_with_samples(
        "run",
        json!([
            {"timestamp": 1_700_000_020, "hr": 130},
            {"timestamp": 1_700_000_000, "hr": 120}
        ]),
    );
    let samples = normalize_default(&workout);
    assert_eq!(samples[0].time, 0.0);
    assert_eq!(samples[1].time, 20.0);
}

#[test]
fn test_sensor_stream_and_gps_merge_by_index() {
    let mut workout = common::workout_with_samples(
        "run",
        json!([{"time": 0, "hr": 120}, {"time": 1, "hr": 121}]),
    );
    workout.gps_track = Some(common::gps_track(&[(0.0, 0.0), (1.0, 3.0), (2.0, 6.0)]));
    let samples = normalize_default(&workout);
    assert_eq!(samples.len(), 3);
    assert!(samples[0].position.is_some());
    assert_eq!(samples[1].heart_rate, Some(121.0));
    // surplus GPS fixes are kept
    assert_eq!(samples[2].heart_rate, None);
    assert!(samples[2].position.is_some());
}

#[test]
fn test_swim_lengths_used_only_without_samples() {
    let mut workout = CompletedWorkout::new("swim");
    workout.swim_lengths = Some(json!([
        {"elapsedTime": 20, "distance": 25},
        {"elapsedTime": 22, "distance": 25}
    ]));
    let samples = normalize_default(&workout);
    let times: Vec<f64> = samples.iter().map(|s| s.time).collect();
    assert_eq!(times, vec![0.0, 20.0, 42.0]);
    assert_eq!(samples[2].cumulative_distance, Some(50.0));
    assert!((samples[1].instant_speed.unwrap() - 1.25).abs() < 1e-9);

    workout.samples = Some(json!([{"time": 0, "hr": 110}, {"time": 5, "hr": 112}]));
    let samples = normalize_default(&workout);
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[1].heart_rate, Some(112.0));
}

#[test]
fn test_records_without_time_are_dropped() {
    let workout = common::workout_with_samples(
        "run",
        json!([{"hr": 120}, {"time": 3, "hr": 121}]),
    );
    let samples = normalize_default(&workout);
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].time, 3.0);
}

#[test]
fn test_malformed_container_is_an_error() {
    let workout = common::workout_with_samples("run", json!([1, 2, 3]));
    let error = normalize(&workout, &SampleConfig::default()).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidFormat);
}

#[test]
fn test_empty_workout_yields_no_samples() {
    let samples = normalize_default(&CompletedWorkout::new("run"));
    assert!(samples.is_empty());
}
