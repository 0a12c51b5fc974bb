// ABOUTME: Data-quality issue taxonomy for degraded reconciliation results
// ABOUTME: MissingSignal, ImplausibleValue, UnresolvableStep and EmptyTelemetry markers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metric a data-quality issue refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Distance covered in the slice
    Distance,
    /// Elapsed time of the slice
    Duration,
    /// Run/walk or swim pace
    Pace,
    /// Ride power
    Power,
    /// Ride speed
    Speed,
    /// Heart rate
    HeartRate,
    /// Pool length / unit inference
    PoolLength,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Distance => "distance",
            Self::Duration => "duration",
            Self::Pace => "pace",
            Self::Power => "power",
            Self::Speed => "speed",
            Self::HeartRate => "heart rate",
            Self::PoolLength => "pool length",
        };
        f.write_str(name)
    }
}

/// Non-fatal data-quality issue
///
/// These never abort a reconciliation. Each one explains why a field in the
/// output is absent or was derived from a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", content = "metric", rename_all = "snake_case")]
pub enum DataIssue {
    /// A required telemetry field is absent for the slice
    MissingSignal(Metric),
    /// A value fell outside its sanity range and was discarded
    ImplausibleValue(Metric),
    /// The planned step has no distance, duration, or parseable fallback
    UnresolvableStep,
    /// No samples at all were available for the slice
    EmptyTelemetry,
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSignal(metric) => write!(f, "missing {metric} signal"),
            Self::ImplausibleValue(metric) => write!(f, "implausible {metric} discarded"),
            Self::UnresolvableStep => f.write_str("step has no target to compare against"),
            Self::EmptyTelemetry => f.write_str("no telemetry for this step"),
        }
    }
}
