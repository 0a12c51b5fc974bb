// ABOUTME: Pool command classifying a swimming pool as yards, meters or unknown
// ABOUTME: Uses an explicit pool length when given, else total distance over active lengths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use workout_reconcile::config::ReconcileConfig;
use workout_reconcile::models::{CompletedWorkout, PoolUnit};
use workout_reconcile::resolver::pool::infer_pool;

use crate::helpers::display::print_block;

/// Infer and print the pool unit
pub fn run(distance: f64, lengths: u32, pool_length: Option<f64>, pool_unit: Option<String>) {
    let mut workout = CompletedWorkout::new("swim");
    workout.total_distance_meters = Some(distance);
    workout.number_of_active_lengths = Some(lengths);
    workout.pool_length = pool_length;
    workout.pool_length_unit = pool_unit;

    let pool = infer_pool(&workout, &ReconcileConfig::global().pool);
    let length = pool
        .meters
        .map_or_else(|| "unknown length".to_owned(), |m| format!("{m:.2} m"));
    let unit = match pool.unit {
        PoolUnit::Yards => "yards",
        PoolUnit::Meters => "meters",
        PoolUnit::Unknown => "unknown",
    };
    print_block(&format!("pool: {length} ({unit})"));
}
