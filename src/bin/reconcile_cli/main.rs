// ABOUTME: workout-reconcile CLI comparing a planned workout file with a completed workout file
// ABOUTME: Prints a per-step comparison table or JSON, and classifies swim pool lengths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Compare a plan with a completed run
//! workout-reconcile compare --plan plan.json --activity run.json
//!
//! # Metric units, JSON output
//! workout-reconcile compare --plan plan.json --activity run.json --units metric --json
//!
//! # Wait for an export that is still being written
//! workout-reconcile compare --plan plan.json --activity run.json --wait
//!
//! # Classify a pool from total distance and active lengths
//! workout-reconcile pool --distance 1000 --lengths 40
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use workout_reconcile::errors::{AppError, AppResult};
use workout_reconcile::formatters::UnitSystem;
use workout_reconcile::logging::LoggingConfig;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "workout-reconcile",
    about = "Planned-vs-executed workout comparison",
    long_about = "Compares a planned workout with the telemetry of the completed workout, step by step."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compare a planned workout with a completed workout
    Compare {
        /// Planned workout JSON file
        #[arg(long)]
        plan: PathBuf,

        /// Completed workout JSON file
        #[arg(long)]
        activity: PathBuf,

        /// Unit system for distance, pace and speed (imperial, metric)
        #[arg(long, default_value = "imperial")]
        units: UnitSystem,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Poll the activity file until it is populated
        #[arg(long)]
        wait: bool,
    },

    /// Classify a swimming pool from total distance and active lengths
    Pool {
        /// Total swim distance in meters
        #[arg(long)]
        distance: f64,

        /// Number of active pool lengths
        #[arg(long)]
        lengths: u32,

        /// Explicit pool length, in `--pool-unit` units
        #[arg(long)]
        pool_length: Option<f64>,

        /// Unit of `--pool-length` (meters, yards)
        #[arg(long)]
        pool_unit: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env()
        .with_verbose(cli.verbose)
        .init()
        .map_err(|e| AppError::internal(format!("failed to initialize logging: {e}")))?;
    debug!("workout-reconcile CLI");

    match cli.command {
        Command::Compare {
            plan,
            activity,
            units,
            json,
            wait,
        } => {
            commands::compare::run(&commands::compare::CompareArgs {
                plan,
                activity,
                units,
                json,
                wait,
            })
            .await?;
        }
        Command::Pool {
            distance,
            lengths,
            pool_length,
            pool_unit,
        } => {
            commands::pool::run(distance, lengths, pool_length, pool_unit);
        }
    }

    Ok(())
}
