// ABOUTME: Output formatting for reconciliation results as a text table or JSON
// ABOUTME: Non-table outcomes render as short state messages rather than empty tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Output formatting
//!
//! ## Supported Formats
//!
//! - **Table**: fixed-width text table, one row per planned step
//! - **JSON**: the full [`Reconciliation`] as pretty-printed JSON

/// Metric display helpers
pub mod metrics;

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use reconcile_core::models::{Adherence, ExecutedInterval, IntervalEffort, PaceBasis};
use thiserror::Error;

use crate::engine::{Reconciliation, WorkoutComparison};
pub use metrics::{
    format_distance, format_duration, format_effort, format_heart_rate, format_pace,
    format_power, format_speed, format_swim_pace, or_placeholder, UnitSystem, PLACEHOLDER,
};

/// Message shown when the plan resolves to no steps
pub const NO_PLAN_MESSAGE: &str = "no plan to compare";
/// Message shown when nothing could be matched against telemetry
pub const NO_COMPARISON_MESSAGE: &str = "no comparison available";
/// Message shown when the server already computed intervals
pub const PRECOMPUTED_MESSAGE: &str = "precomputed intervals available";

/// Output serialization format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Text table (default)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Get the format name as a string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for formatting operations
#[derive(Debug, Error)]
#[error("Format error ({format}): {message}")]
pub struct FormatError {
    /// Error message describing what went wrong
    pub message: String,
    /// The format that was being used when the error occurred
    pub format: OutputFormat,
}

const fn adherence_label(adherence: Option<Adherence>) -> &'static str {
    match adherence {
        Some(Adherence::OnTarget) => "on target",
        Some(Adherence::TooHard) => "too hard",
        Some(Adherence::TooEasy) => "too easy",
        None => PLACEHOLDER,
    }
}

/// Effort cell; paces not based on measured distance are marked with `*`
fn effort_cell(interval: &ExecutedInterval, units: UnitSystem) -> String {
    let rendered = format_effort(interval.effort.as_ref(), units);
    match interval.effort {
        Some(IntervalEffort::Pace { basis, .. }) if basis != PaceBasis::Measured => {
            format!("{rendered}*")
        }
        _ => rendered,
    }
}

fn notes_cell(interval: &ExecutedInterval) -> String {
    interval
        .issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render a comparison as a fixed-width table
#[must_use]
pub fn render_table(comparison: &WorkoutComparison, units: UnitSystem) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>2}  {:<10} {:>9} {:>8} {:>12} {:>8} {:>10}  Notes",
        "#", "Step", "Distance", "Time", "Effort", "HR", "Target"
    );
    for interval in &comparison.intervals {
        let _ = writeln!(
            out,
            "{:>2}  {:<10} {:>9} {:>8} {:>12} {:>8} {:>10}  {}",
            interval.step_index + 1,
            interval.kind.to_string(),
            or_placeholder(interval.distance_meters, |m| format_distance(m, units)),
            or_placeholder(interval.duration_seconds, format_duration),
            effort_cell(interval, units),
            or_placeholder(interval.avg_heart_rate, format_heart_rate),
            adherence_label(interval.adherence),
            notes_cell(interval),
        );
    }
    let estimated = comparison.intervals.iter().any(|interval| {
        matches!(
            interval.effort,
            Some(IntervalEffort::Pace { basis, .. }) if basis != PaceBasis::Measured
        )
    });
    if estimated {
        out.push_str("* pace from planned or speed-derived distance\n");
    }
    out
}

/// Render any reconciliation outcome
///
/// # Errors
///
/// Returns `FormatError` if JSON serialization fails
pub fn format_reconciliation(
    reconciliation: &Reconciliation,
    format: OutputFormat,
    units: UnitSystem,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(reconciliation).map_err(|e| FormatError {
                message: e.to_string(),
                format,
            })
        }
        OutputFormat::Table => Ok(match reconciliation {
            Reconciliation::Compared(comparison) if comparison.has_measurements() => {
                render_table(comparison, units)
            }
            Reconciliation::Compared(_) | Reconciliation::NoTelemetry => {
                format!("{NO_COMPARISON_MESSAGE}\n")
            }
            Reconciliation::NoPlan => format!("{NO_PLAN_MESSAGE}\n"),
            Reconciliation::Precomputed(intervals) => {
                format!("{PRECOMPUTED_MESSAGE} ({})\n", intervals.len())
            }
        }),
    }
}
