// ABOUTME: Planned workout model supplied by the external plan store
// ABOUTME: Planned steps with distance/duration bounds and optional pace or power targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a planned step within the workout
///
/// Only selects aggregation and trimming heuristics; it never supplies a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum StepKind {
    /// Warm-up segment
    Warmup,
    /// Work interval
    Work,
    /// Rest, recovery or jog segment
    Rest,
    /// Cool-down segment
    Cooldown,
    /// Kind not supplied by the plan
    #[default]
    Unspecified,
}

impl StepKind {
    /// Parse a plan-store label, accepting common provider spellings
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "warmup" | "wu" => Self::Warmup,
            "work" | "interval" | "active" | "main" | "repeat" | "rep" => Self::Work,
            "rest" | "recovery" | "recover" | "jog" | "easy" | "float" => Self::Rest,
            "cooldown" | "cd" => Self::Cooldown,
            _ => Self::Unspecified,
        }
    }

    /// Whether a workout-level typical interval distance may stand in for a missing target
    #[must_use]
    pub const fn accepts_typical_distance(self) -> bool {
        matches!(self, Self::Work | Self::Unspecified)
    }
}

impl From<String> for StepKind {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Warmup => "Warm-up",
            Self::Work => "Work",
            Self::Rest => "Rest",
            Self::Cooldown => "Cool-down",
            Self::Unspecified => "Step",
        };
        f.write_str(label)
    }
}

/// Target pace window in seconds per mile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceRange {
    /// Fastest acceptable pace (fewest seconds per mile)
    #[serde(alias = "min", alias = "fastest")]
    pub fast_seconds_per_mile: f64,
    /// Slowest acceptable pace (most seconds per mile)
    #[serde(alias = "max", alias = "slowest")]
    pub slow_seconds_per_mile: f64,
}

/// Target power window in watts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerRange {
    /// Lower bound in watts
    #[serde(alias = "min")]
    pub low_watts: f64,
    /// Upper bound in watts
    #[serde(alias = "max")]
    pub high_watts: f64,
}

/// How the segmenter bounds a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StepBound {
    /// Advance until this many meters have been covered
    Distance(f64),
    /// Advance until this many seconds have elapsed
    Duration(f64),
}

/// One segment of the intended workout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedStep {
    /// Plan-store identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Step role
    #[serde(default, alias = "type", alias = "step_type")]
    pub kind: StepKind,
    /// Target distance in meters
    #[serde(default, alias = "target_distance_meters", alias = "distance_meters")]
    pub target_distance_meters: Option<f64>,
    /// Target duration in seconds
    #[serde(default, alias = "target_duration_seconds", alias = "duration_seconds")]
    pub target_duration_seconds: Option<f64>,
    /// Target pace in seconds per mile
    #[serde(default, alias = "target_pace_seconds_per_mile")]
    pub target_pace_seconds_per_mile: Option<f64>,
    /// Target pace window
    #[serde(default, alias = "target_pace_range")]
    pub target_pace_range: Option<PaceRange>,
    /// Target power in watts
    #[serde(default, alias = "target_power_watts")]
    pub target_power_watts: Option<f64>,
    /// Target power window
    #[serde(default, alias = "target_power_range")]
    pub target_power_range: Option<PowerRange>,
}

impl PlannedStep {
    /// Distance-bounded step
    #[must_use]
    pub fn distance(kind: StepKind, meters: f64) -> Self {
        Self {
            kind,
            target_distance_meters: Some(meters),
            ..Self::default()
        }
    }

    /// Duration-bounded step
    #[must_use]
    pub fn duration(kind: StepKind, seconds: f64) -> Self {
        Self {
            kind,
            target_duration_seconds: Some(seconds),
            ..Self::default()
        }
    }

    /// Attach a single target pace
    #[must_use]
    pub fn with_target_pace(mut self, seconds_per_mile: f64) -> Self {
        self.target_pace_seconds_per_mile = Some(seconds_per_mile);
        self
    }

    /// Attach a target power
    #[must_use]
    pub fn with_target_power(mut self, watts: f64) -> Self {
        self.target_power_watts = Some(watts);
        self
    }

    /// Attach an identifier
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Positive, finite target distance
    #[must_use]
    pub fn planned_distance(&self) -> Option<f64> {
        self.target_distance_meters
            .filter(|meters| meters.is_finite() && *meters > 0.0)
    }

    /// Positive, finite target duration
    #[must_use]
    pub fn planned_duration(&self) -> Option<f64> {
        self.target_duration_seconds
            .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
    }

    /// Bound from the step's own targets: distance first, then duration
    #[must_use]
    pub fn bound(&self) -> Option<StepBound> {
        self.planned_distance()
            .map(StepBound::Distance)
            .or_else(|| self.planned_duration().map(StepBound::Duration))
    }
}

/// Planned workout supplied by the plan store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedWorkout {
    /// Structured steps, possibly empty for legacy plans
    #[serde(default)]
    pub steps: Vec<PlannedStep>,
    /// Free-text rendering of the plan
    #[serde(
        default,
        alias = "rendered_description",
        alias = "description",
        skip_serializing_if = "Option::is_none"
    )]
    pub rendered_description: Option<String>,
    /// Compact step tokens such as `6x400m` or `R2min`
    #[serde(default, alias = "step_tokens")]
    pub tokens: Vec<String>,
}

impl PlannedWorkout {
    /// Workout with structured steps only
    #[must_use]
    pub const fn from_steps(steps: Vec<PlannedStep>) -> Self {
        Self {
            steps,
            rendered_description: None,
            tokens: Vec::new(),
        }
    }
}
