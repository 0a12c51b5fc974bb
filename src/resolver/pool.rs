// ABOUTME: Pool-length inference for swim workouts with a three-way yards/meters/unknown outcome
// ABOUTME: Explicit pool length first, else total distance divided by active length count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reconcile_core::constants::pool::{METER_POOL_LENGTHS, YARD_POOL_METERS};
use reconcile_core::constants::units::METERS_PER_YARD;
use reconcile_core::models::{CompletedWorkout, PoolLength, PoolUnit};
use tracing::debug;

use crate::config::PoolConfig;

/// Classify a pool length in meters
///
/// Within the yard tolerance of 22.86 m is a yard pool; within the meter
/// tolerance of 25, 33.33 or 50 m is a meter pool; anything else is unknown.
#[must_use]
pub fn classify_pool_length(meters: f64, config: &PoolConfig) -> PoolUnit {
    if !meters.is_finite() || meters <= 0.0 {
        return PoolUnit::Unknown;
    }
    if (meters - YARD_POOL_METERS).abs() <= config.yard_tolerance_meters {
        return PoolUnit::Yards;
    }
    if METER_POOL_LENGTHS
        .iter()
        .any(|length| (meters - length).abs() <= config.meter_tolerance_meters)
    {
        return PoolUnit::Meters;
    }
    PoolUnit::Unknown
}

/// Parse a provider pool-length unit string
#[must_use]
pub fn parse_pool_unit(unit: &str) -> PoolUnit {
    match unit.trim().to_lowercase().as_str() {
        "yards" | "yard" | "yd" | "yds" | "y" | "scy" => PoolUnit::Yards,
        "meters" | "meter" | "metres" | "metre" | "m" | "scm" | "lcm" => PoolUnit::Meters,
        _ => PoolUnit::Unknown,
    }
}

/// Explicit pool length in meters together with its declared unit, if any
#[must_use]
pub fn explicit_pool_length(workout: &CompletedWorkout) -> Option<(f64, PoolUnit)> {
    let length = workout
        .pool_length
        .filter(|length| length.is_finite() && *length > 0.0)?;
    let unit = workout
        .pool_length_unit
        .as_deref()
        .map_or(PoolUnit::Unknown, parse_pool_unit);
    let meters = match unit {
        PoolUnit::Yards => length * METERS_PER_YARD,
        PoolUnit::Meters | PoolUnit::Unknown => length,
    };
    Some((meters, unit))
}

/// Pool length in meters: explicit field first, else distance / active lengths
#[must_use]
pub fn pool_length_meters(workout: &CompletedWorkout) -> Option<f64> {
    explicit_pool_length(workout)
        .map(|(meters, _)| meters)
        .or_else(|| {
            let lengths = workout.number_of_active_lengths.filter(|n| *n > 0)?;
            Some(workout.total_distance()? / f64::from(lengths))
        })
}

/// Infer the pool length and unit of a swim workout
///
/// A declared unit is taken as-is. Otherwise the length is classified, and an
/// unclassifiable length stays [`PoolUnit::Unknown`].
#[must_use]
pub fn infer_pool(workout: &CompletedWorkout, config: &PoolConfig) -> PoolLength {
    if let Some((meters, declared)) = explicit_pool_length(workout) {
        if declared != PoolUnit::Unknown {
            return PoolLength {
                meters: Some(meters),
                unit: declared,
            };
        }
    }
    let Some(meters) = pool_length_meters(workout) else {
        debug!("pool length unavailable: no explicit length and no distance/length count");
        return PoolLength::unknown();
    };
    let unit = classify_pool_length(meters, config);
    debug!(meters, unit = ?unit, "inferred pool length");
    PoolLength {
        meters: Some(meters),
        unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_windows() {
        let config = PoolConfig::default();
        assert_eq!(classify_pool_length(22.86, &config), PoolUnit::Yards);
        assert_eq!(classify_pool_length(23.4, &config), PoolUnit::Yards);
        assert_eq!(classify_pool_length(25.0, &config), PoolUnit::Meters);
        assert_eq!(classify_pool_length(33.0, &config), PoolUnit::Meters);
        assert_eq!(classify_pool_length(50.9, &config), PoolUnit::Meters);
        assert_eq!(classify_pool_length(23.7, &config), PoolUnit::Unknown);
        assert_eq!(classify_pool_length(40.0, &config), PoolUnit::Unknown);
        assert_eq!(classify_pool_length(0.0, &config), PoolUnit::Unknown);
    }

    #[test]
    fn test_declared_yard_unit_wins() {
        let mut workout = CompletedWorkout::new("swim");
        workout.pool_length = Some(25.0);
        workout.pool_length_unit = Some("yards".to_owned());
        let pool = infer_pool(&workout, &PoolConfig::default());
        assert_eq!(pool.unit, PoolUnit::Yards);
        assert!((pool.meters.unwrap() - 22.86).abs() < 1e-9);
    }
}
