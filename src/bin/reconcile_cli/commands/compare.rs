// ABOUTME: Compare command loading plan and activity files and printing the reconciliation
// ABOUTME: Optionally polls the activity file until an exporter has populated it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::PathBuf;

use tracing::info;
use workout_reconcile::engine::ReconciliationEngine;
use workout_reconcile::errors::{AppError, AppResult};
use workout_reconcile::fetch::{
    load_json, poll_for_telemetry, FileTelemetrySource, PollConfig, PollOutcome,
};
use workout_reconcile::formatters::{format_reconciliation, OutputFormat, UnitSystem};
use workout_reconcile::models::{CompletedWorkout, PlannedWorkout};

use crate::helpers::display::{print_block, STILL_COMPUTING_MESSAGE};

type Result<T> = AppResult<T>;

/// Arguments of `workout-reconcile compare`
pub struct CompareArgs {
    /// Planned workout file
    pub plan: PathBuf,
    /// Completed workout file
    pub activity: PathBuf,
    /// Display units
    pub units: UnitSystem,
    /// JSON instead of a table
    pub json: bool,
    /// Poll until the activity file is populated
    pub wait: bool,
}

/// Load both files, reconcile and print
pub async fn run(args: &CompareArgs) -> Result<()> {
    let plan: PlannedWorkout = load_json(&args.plan).await?;

    let workout: CompletedWorkout = if args.wait {
        let source = FileTelemetrySource::new(args.activity.clone());
        let id = args.activity.display().to_string();
        match poll_for_telemetry(&source, &id, &PollConfig::default()).await? {
            PollOutcome::Ready(workout) => workout,
            PollOutcome::StillComputing => {
                print_block(STILL_COMPUTING_MESSAGE);
                return Ok(());
            }
        }
    } else {
        load_json(&args.activity).await?
    };

    info!(
        steps = plan.steps.len(),
        sport = %workout.sport,
        "reconciling workout"
    );

    let engine = ReconciliationEngine::default();
    let reconciliation = engine.reconcile(&plan, &workout)?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };
    let rendered = format_reconciliation(&reconciliation, format, args.units)
        .map_err(|e| AppError::internal(e.to_string()))?;
    print_block(&rendered);
    Ok(())
}
