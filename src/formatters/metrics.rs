// ABOUTME: Display helpers for pace, duration, distance, speed, power and heart rate
// ABOUTME: Absent values render as a placeholder rather than zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use reconcile_core::constants::units::{METERS_PER_KM, METERS_PER_MILE, MPS_TO_KPH, MPS_TO_MPH};
use reconcile_core::models::{IntervalEffort, PoolUnit};

/// Shown wherever a metric is absent
pub const PLACEHOLDER: &str = "—";

/// Unit system for distance, pace and speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    /// Miles, minutes per mile, mph
    #[default]
    Imperial,
    /// Kilometers, minutes per kilometer, kph
    Metric,
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "imperial" | "mi" | "miles" => Ok(Self::Imperial),
            "metric" | "km" | "kilometers" => Ok(Self::Metric),
            other => Err(format!("unknown unit system '{other}'")),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imperial => f.write_str("imperial"),
            Self::Metric => f.write_str("metric"),
        }
    }
}

/// Round to whole seconds, clamping negatives to zero
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(seconds: f64) -> u64 {
    seconds.round().max(0.0) as u64
}

/// Elapsed time as `m:ss`, or `h:mm:ss` from one hour
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        return PLACEHOLDER.to_owned();
    }
    let total = whole_seconds(seconds);
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Run pace, e.g. `7:00/mi` or `4:21/km`
#[must_use]
pub fn format_pace(seconds_per_mile: f64, units: UnitSystem) -> String {
    if !seconds_per_mile.is_finite() || seconds_per_mile <= 0.0 {
        return PLACEHOLDER.to_owned();
    }
    match units {
        UnitSystem::Imperial => format!("{}/mi", format_duration(seconds_per_mile)),
        UnitSystem::Metric => {
            let seconds_per_km = seconds_per_mile * METERS_PER_KM / METERS_PER_MILE;
            format!("{}/km", format_duration(seconds_per_km))
        }
    }
}

/// Swim pace per 100 pool units, e.g. `1:45/100yd`; unknown pools have no pace
#[must_use]
pub fn format_swim_pace(seconds_per_hundred: f64, unit: PoolUnit) -> String {
    match unit.suffix() {
        Some(suffix) if seconds_per_hundred.is_finite() && seconds_per_hundred > 0.0 => {
            format!("{}/100{suffix}", format_duration(seconds_per_hundred))
        }
        _ => PLACEHOLDER.to_owned(),
    }
}

/// Distance with two decimals in miles or kilometers
#[must_use]
pub fn format_distance(meters: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Imperial => format!("{:.2} mi", meters / METERS_PER_MILE),
        UnitSystem::Metric => format!("{:.2} km", meters / METERS_PER_KM),
    }
}

/// Speed in mph or kph
#[must_use]
pub fn format_speed(meters_per_second: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Imperial => format!("{:.1} mph", meters_per_second * MPS_TO_MPH),
        UnitSystem::Metric => format!("{:.1} kph", meters_per_second * MPS_TO_KPH),
    }
}

/// Power in whole watts
#[must_use]
pub fn format_power(watts: f64) -> String {
    format!("{watts:.0} W")
}

/// Heart rate in whole beats per minute
#[must_use]
pub fn format_heart_rate(bpm: f64) -> String {
    format!("{bpm:.0} bpm")
}

/// Effort column for any sport
#[must_use]
pub fn format_effort(effort: Option<&IntervalEffort>, units: UnitSystem) -> String {
    match effort {
        Some(IntervalEffort::Pace {
            seconds_per_mile, ..
        }) => format_pace(*seconds_per_mile, units),
        Some(IntervalEffort::SwimPace {
            seconds_per_hundred,
            unit,
        }) => format_swim_pace(*seconds_per_hundred, *unit),
        Some(IntervalEffort::Power { watts }) => format_power(*watts),
        Some(IntervalEffort::Speed { meters_per_second }) => {
            format_speed(*meters_per_second, units)
        }
        None => PLACEHOLDER.to_owned(),
    }
}

/// Format a present value or fall back to the placeholder
pub fn or_placeholder<T>(value: Option<T>, format: impl FnOnce(T) -> String) -> String {
    value.map_or_else(|| PLACEHOLDER.to_owned(), format)
}
