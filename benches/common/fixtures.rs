// ABOUTME: Benchmark fixtures generating realistic interval sessions and telemetry streams
// ABOUTME: Deterministic data so that measurements are reproducible between runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for interval sessions.

use std::f64::consts::PI;

use serde_json::{json, Value};
use workout_reconcile::models::{CompletedWorkout, PlannedStep, PlannedWorkout, StepKind};

const METERS_PER_DEGREE: f64 = 6_371_000.0 * PI / 180.0;

/// Predefined session lengths
#[derive(Debug, Clone, Copy)]
pub enum SessionSize {
    /// 30 minutes of 1 Hz samples
    Short,
    /// Two hours of 1 Hz samples
    Long,
}

impl SessionSize {
    #[must_use]
    pub const fn seconds(self) -> usize {
        match self {
            Self::Short => 1_800,
            Self::Long => 7_200,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Short => "30min",
            Self::Long => "2h",
        }
    }
}

/// Warm-up, 8x800m with 2 min jog, cool-down
#[must_use]
pub fn interval_plan() -> PlannedWorkout {
    let mut steps = vec![PlannedStep::duration(StepKind::Warmup, 900.0)];
    for rep in 0..8 {
        if rep > 0 {
            steps.push(PlannedStep::duration(StepKind::Rest, 120.0));
        }
        steps.push(PlannedStep::distance(StepKind::Work, 800.0).with_target_pace(400.0));
    }
    steps.push(PlannedStep::duration(StepKind::Cooldown, 600.0));
    PlannedWorkout::from_steps(steps)
}

/// Same session described only by tokens
#[must_use]
pub fn token_plan() -> PlannedWorkout {
    PlannedWorkout {
        steps: Vec::new(),
        rendered_description: Some("Warm up well before the reps".to_owned()),
        tokens: vec![
            "WU 15min".to_owned(),
            "8x800m".to_owned(),
            "R2min".to_owned(),
            "CD 10min".to_owned(),
        ],
    }
}

/// 1 Hz run with GPS, heart rate and speed, alternating fast and easy blocks
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn run_workout(size: SessionSize) -> CompletedWorkout {
    let mut gps = Vec::with_capacity(size.seconds());
    let mut sensors = Vec::with_capacity(size.seconds());
    let mut meters = 0.0;
    for second in 0..size.seconds() {
        let fast = (second / 180) % 2 == 1;
        let speed = if fast { 4.2 } else { 2.8 };
        meters += speed;
        let hr = if fast { 168.0 } else { 138.0 } + (second % 7) as f64;
        gps.push(json!({
            "time": second,
            "lat": meters / METERS_PER_DEGREE,
            "lng": 0.0
        }));
        sensors.push(json!({"time": second, "hr": hr, "speed": speed}));
    }
    let mut workout = CompletedWorkout::new("run");
    workout.gps_track = Some(Value::Array(gps));
    workout.samples = Some(Value::Array(sensors));
    workout
}

/// Pool swim described by per-length records only
#[must_use]
pub fn swim_workout(lengths: usize) -> CompletedWorkout {
    let records: Vec<Value> = (0..lengths)
        .map(|index| json!({"elapsedTime": 22 + index % 4, "distance": 22.86}))
        .collect();
    let mut workout = CompletedWorkout::new("swim");
    workout.swim_lengths = Some(Value::Array(records));
    workout.pool_length = Some(25.0);
    workout.pool_length_unit = Some("yards".to_owned());
    workout
}
