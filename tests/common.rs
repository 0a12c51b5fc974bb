// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Builds synthetic GPS tracks, sensor streams and engine instances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `workout_reconcile`
//!
//! Tracks run due north along the prime meridian so that haversine distance
//! between fixes equals the latitude difference times the meters per degree.

use std::env;
use std::f64::consts::PI;
use std::sync::Once;

use serde_json::{json, Value};
use tracing::Level;
use workout_reconcile::config::ReconcileConfig;
use workout_reconcile::distance::{accumulate, AccumulatedSample};
use workout_reconcile::engine::{Reconciliation, ReconciliationEngine, WorkoutComparison};
use workout_reconcile::models::{CompletedWorkout, Sample};

static INIT_LOGGER: Once = Once::new();

/// Meters per degree of latitude on the haversine sphere
pub const METERS_PER_DEGREE: f64 = 6_371_000.0 * PI / 180.0;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Latitude reached after `meters` due north of the equator
pub fn lat_for_meters(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// One GPS record at `time` seconds, `meters` north of the origin
pub fn gps_record(time: f64, meters: f64) -> Value {
    json!({"time": time, "lat": lat_for_meters(meters), "lng": 0.0})
}

/// GPS track from `(time, meters)` pairs
pub fn gps_track(points: &[(f64, f64)]) -> Value {
    Value::Array(points.iter().map(|&(t, m)| gps_record(t, m)).collect())
}

/// Constant-speed GPS track sampled every `interval` seconds up to `duration`
pub fn steady_track(duration: f64, interval: f64, speed: f64) -> Vec<(f64, f64)> {
    let steps = (duration / interval).round() as usize;
    (0..=steps)
        .map(|i| {
            let t = i as f64 * interval;
            (t, t * speed)
        })
        .collect()
}

/// Completed workout with a GPS track only
pub fn workout_with_track(sport: &str, points: &[(f64, f64)]) -> CompletedWorkout {
    let mut workout = CompletedWorkout::new(sport);
    workout.gps_track = Some(gps_track(points));
    workout
}

/// Completed workout with a generic sensor stream only
pub fn workout_with_samples(sport: &str, samples: Value) -> CompletedWorkout {
    let mut workout = CompletedWorkout::new(sport);
    workout.samples = Some(samples);
    workout
}

/// Engine with default thresholds, independent of the environment
pub fn engine() -> ReconciliationEngine {
    init_test_logging();
    ReconciliationEngine::new(ReconcileConfig::default())
}

/// Accumulate samples with default thresholds
pub fn accumulate_default(samples: &[Sample]) -> Vec<AccumulatedSample> {
    let config = ReconcileConfig::default();
    accumulate(samples, &config.samples, &config.accumulator)
}

/// The comparison inside a reconciliation, if one was produced
pub fn comparison(reconciliation: &Reconciliation) -> Option<&WorkoutComparison> {
    match reconciliation {
        Reconciliation::Compared(comparison) => Some(comparison),
        _ => None,
    }
}
