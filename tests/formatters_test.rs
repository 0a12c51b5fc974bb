// ABOUTME: Integration tests for reconciliation output formatting
// ABOUTME: Table rows, placeholders, state messages and JSON outcome tagging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serde_json::Value;
use workout_reconcile::engine::{Reconciliation, WorkoutComparison};
use workout_reconcile::errors::{DataIssue, Metric};
use workout_reconcile::formatters::{
    format_distance, format_reconciliation, format_speed, render_table, OutputFormat, UnitSystem,
    NO_COMPARISON_MESSAGE, NO_PLAN_MESSAGE, PLACEHOLDER, PRECOMPUTED_MESSAGE,
};
use workout_reconcile::models::{
    Adherence, ExecutedInterval, IntervalEffort, IntervalStatus, PaceBasis, PlannedStep,
    SportType, StepKind,
};
use workout_reconcile::resolver::StepSource;

fn measured_rep(index: usize, basis: PaceBasis) -> ExecutedInterval {
    let step = PlannedStep::distance(StepKind::Work, 1609.34).with_target_pace(420.0);
    let mut interval = ExecutedInterval::empty(index, &step, IntervalStatus::Measured);
    interval.distance_meters = Some(1609.34);
    interval.duration_seconds = Some(418.0);
    interval.effort = Some(IntervalEffort::Pace {
        seconds_per_mile: 418.0,
        basis,
    });
    interval.avg_heart_rate = Some(171.4);
    interval.adherence = Some(Adherence::OnTarget);
    interval
}

fn comparison(intervals: Vec<ExecutedInterval>) -> WorkoutComparison {
    WorkoutComparison {
        sport: SportType::Run,
        step_source: StepSource::Structured,
        pool: None,
        trimmed_seconds: 0.0,
        intervals,
    }
}

#[test]
fn test_table_row_for_measured_interval() {
    let table = render_table(&comparison(vec![measured_rep(0, PaceBasis::Measured)]), UnitSystem::Imperial);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Distance"));
    let row = lines[1];
    assert!(row.contains("Work"));
    assert!(row.contains("1.00 mi"));
    assert!(row.contains("6:58"));
    assert!(row.contains("6:58/mi"));
    assert!(row.contains("171 bpm"));
    assert!(row.contains("on target"));
    assert!(!table.contains('*'));
}

#[test]
fn test_estimated_pace_is_marked() {
    let table = render_table(
        &comparison(vec![measured_rep(0, PaceBasis::Planned)]),
        UnitSystem::Metric,
    );
    assert!(table.contains("4:20/km*"));
    assert!(table.contains("1.61 km"));
    assert!(table.ends_with("* pace from planned or speed-derived distance\n"));
}

#[test]
fn test_absent_metrics_render_placeholders_and_notes() {
    let step = PlannedStep::duration(StepKind::Rest, 90.0);
    let mut rest = ExecutedInterval::empty(1, &step, IntervalStatus::Measured);
    rest.duration_seconds = Some(90.0);
    rest.note(DataIssue::MissingSignal(Metric::HeartRate));
    rest.note(DataIssue::ImplausibleValue(Metric::Speed));

    let table = render_table(
        &comparison(vec![measured_rep(0, PaceBasis::Measured), rest]),
        UnitSystem::Imperial,
    );
    let row = table.lines().nth(2).unwrap();
    assert!(row.contains("1:30"));
    assert!(row.contains(PLACEHOLDER));
    assert!(row.contains("missing heart rate signal; implausible speed discarded"));
    assert!(!row.contains("0 bpm"));
}

#[test]
fn test_state_messages_instead_of_empty_tables() {
    let render = |outcome: &Reconciliation| {
        format_reconciliation(outcome, OutputFormat::Table, UnitSystem::Imperial).unwrap()
    };
    assert_eq!(render(&Reconciliation::NoPlan), format!("{NO_PLAN_MESSAGE}\n"));
    assert_eq!(
        render(&Reconciliation::NoTelemetry),
        format!("{NO_COMPARISON_MESSAGE}\n")
    );

    let step = PlannedStep::default();
    let unmatched = comparison(vec![ExecutedInterval::unresolvable(0, &step)]);
    assert_eq!(
        render(&Reconciliation::Compared(unmatched)),
        format!("{NO_COMPARISON_MESSAGE}\n")
    );

    let precomputed = Reconciliation::Precomputed(vec![Value::Null, Value::Null]);
    assert!(render(&precomputed).starts_with(PRECOMPUTED_MESSAGE));
}

#[test]
fn test_json_output_is_tagged_by_outcome() {
    let outcome = Reconciliation::Compared(comparison(vec![measured_rep(0, PaceBasis::Measured)]));
    let rendered = format_reconciliation(&outcome, OutputFormat::Json, UnitSystem::Imperial).unwrap();
    let value: Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["outcome"], "compared");
    assert_eq!(value["data"]["stepSource"], "structured");
    assert_eq!(value["data"]["intervals"][0]["durationSeconds"], 418.0);

    let rendered =
        format_reconciliation(&Reconciliation::NoPlan, OutputFormat::Json, UnitSystem::Metric)
            .unwrap();
    let value: Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["outcome"], "no_plan");
}

#[test]
fn test_output_and_unit_parsing() {
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
    assert!("xml".parse::<OutputFormat>().is_err());
    assert_eq!("km".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
    assert!("furlongs".parse::<UnitSystem>().is_err());
}

#[test]
fn test_distance_and_speed_units() {
    assert_eq!(format_distance(5000.0, UnitSystem::Metric), "5.00 km");
    assert_eq!(format_distance(1609.344, UnitSystem::Imperial), "1.00 mi");
    assert_eq!(format_speed(10.0, UnitSystem::Metric), "36.0 kph");
    assert_eq!(format_speed(10.0, UnitSystem::Imperial), "22.4 mph");
}
