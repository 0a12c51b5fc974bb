// ABOUTME: Executed interval output, one row per planned step
// ABOUTME: Every unavailable metric is an explicit absence with a data-quality issue explaining why
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{PlannedStep, PoolUnit, StepKind};
use crate::errors::DataIssue;

/// Where a run/walk pace's distance came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceBasis {
    /// Measured slice distance
    Measured,
    /// Planned distance substituted for a GPS dropout on a work step
    Planned,
    /// Distance derived from average instantaneous speed on a rest step
    SpeedDerived,
}

/// Sport-dependent effort summary
///
/// Pace and power are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntervalEffort {
    /// Run/walk pace
    Pace {
        /// Elapsed seconds per mile
        seconds_per_mile: f64,
        /// Distance provenance
        basis: PaceBasis,
    },
    /// Swim pace per 100 pool units
    SwimPace {
        /// Elapsed seconds per 100 units
        seconds_per_hundred: f64,
        /// Yards or meters; never unknown
        unit: PoolUnit,
    },
    /// Ride average power
    Power {
        /// Average watts
        watts: f64,
    },
    /// Ride average speed when no power was recorded
    Speed {
        /// Average speed in m/s
        meters_per_second: f64,
    },
}

/// How the executed effort compares with the step target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adherence {
    /// Within the target window
    OnTarget,
    /// Faster pace or higher power than the target
    TooHard,
    /// Slower pace or lower power than the target
    TooEasy,
}

/// Whether an interval carries comparison data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalStatus {
    /// A slice was matched and aggregated
    Measured,
    /// The step had no distance, duration or fallback bound
    Unresolvable,
    /// The cursor had already reached the end of the telemetry
    BeyondTelemetry,
}

/// Measured outcome attributed to one planned step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutedInterval {
    /// Position of the step in the planned list
    pub step_index: usize,
    /// Plan-store identifier of the step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    /// Step role
    pub kind: StepKind,
    /// Comparison status
    pub status: IntervalStatus,
    /// Distance covered in meters
    pub distance_meters: Option<f64>,
    /// Elapsed seconds
    pub duration_seconds: Option<f64>,
    /// Pace, power or speed
    pub effort: Option<IntervalEffort>,
    /// Mean plausible heart rate
    pub avg_heart_rate: Option<f64>,
    /// Comparison with the step's pace or power target
    pub adherence: Option<Adherence>,
    /// Why any of the fields above are absent or derived
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DataIssue>,
}

impl ExecutedInterval {
    /// Interval with every metric absent
    #[must_use]
    pub fn empty(step_index: usize, step: &PlannedStep, status: IntervalStatus) -> Self {
        Self {
            step_index,
            step_id: step.id.clone(),
            kind: step.kind,
            status,
            distance_meters: None,
            duration_seconds: None,
            effort: None,
            avg_heart_rate: None,
            adherence: None,
            issues: Vec::new(),
        }
    }

    /// Row for a step with nothing to compare against
    #[must_use]
    pub fn unresolvable(step_index: usize, step: &PlannedStep) -> Self {
        let mut interval = Self::empty(step_index, step, IntervalStatus::Unresolvable);
        interval.issues.push(DataIssue::UnresolvableStep);
        interval
    }

    /// Run/walk pace in seconds per mile, when this is a pace interval
    #[must_use]
    pub fn avg_pace_seconds_per_mile(&self) -> Option<f64> {
        match self.effort {
            Some(IntervalEffort::Pace {
                seconds_per_mile, ..
            }) => Some(seconds_per_mile),
            _ => None,
        }
    }

    /// Average power in watts, when this is a ride interval with power
    #[must_use]
    pub fn avg_power_watts(&self) -> Option<f64> {
        match self.effort {
            Some(IntervalEffort::Power { watts }) => Some(watts),
            _ => None,
        }
    }

    /// Record a data-quality issue once
    pub fn note(&mut self, issue: DataIssue) {
        if !self.issues.contains(&issue) {
            self.issues.push(issue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolvable_interval_has_no_metrics() {
        let step = PlannedStep::default().with_id("s1");
        let interval = ExecutedInterval::unresolvable(2, &step);
        assert_eq!(interval.status, IntervalStatus::Unresolvable);
        assert_eq!(interval.step_id.as_deref(), Some("s1"));
        assert!(interval.distance_meters.is_none());
        assert_eq!(interval.issues, vec![DataIssue::UnresolvableStep]);
    }

    #[test]
    fn test_effort_serializes_with_type_tag() {
        let effort = IntervalEffort::Power { watts: 250.0 };
        let json = serde_json::to_value(effort).unwrap();
        assert_eq!(json["type"], "power");
        assert_eq!(json["watts"], 250.0);
    }

    #[test]
    fn test_note_deduplicates() {
        let mut interval =
            ExecutedInterval::empty(0, &PlannedStep::default(), IntervalStatus::Measured);
        interval.note(DataIssue::EmptyTelemetry);
        interval.note(DataIssue::EmptyTelemetry);
        assert_eq!(interval.issues.len(), 1);
    }
}
