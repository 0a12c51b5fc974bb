// ABOUTME: Prioritized field registry resolving provider-specific telemetry keys per metric
// ABOUTME: Each metric lists candidate keys in priority order with the unit conversion to apply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Field resolution
//!
//! Providers name the same measurement differently (`heartrate`, `heart_rate`,
//! `hr`, ...). Every metric has one ordered candidate list here; the first
//! candidate that is present with a usable value wins. Resolution happens once
//! per record at normalization time.

use chrono::{DateTime, TimeZone, Utc};
use reconcile_core::constants::units::{METERS_PER_KM, METERS_PER_MILE, SECONDS_PER_MINUTE};
use reconcile_core::models::GeoPoint;
use serde_json::{Map, Value};

/// A JSON telemetry record
pub type Record = Map<String, Value>;

/// Conversion from a provider field's unit to the sample's unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Value is already in the target unit
    Identity,
    /// Kilometers to meters
    KilometersToMeters,
    /// Kilometers per hour to meters per second
    KphToMps,
    /// Seconds per kilometer to meters per second
    SecondsPerKmToMps,
    /// Seconds per mile to meters per second
    SecondsPerMileToMps,
    /// Minutes per kilometer to meters per second
    MinutesPerKmToMps,
}

impl Conversion {
    /// Apply the conversion, rejecting results that are not finite
    #[must_use]
    pub fn apply(self, value: f64) -> Option<f64> {
        let result = match self {
            Self::Identity => value,
            Self::KilometersToMeters => value * METERS_PER_KM,
            Self::KphToMps => value / 3.6,
            Self::SecondsPerKmToMps => pace_to_speed(value, METERS_PER_KM)?,
            Self::SecondsPerMileToMps => pace_to_speed(value, METERS_PER_MILE)?,
            Self::MinutesPerKmToMps => pace_to_speed(value * SECONDS_PER_MINUTE, METERS_PER_KM)?,
        };
        result.is_finite().then_some(result)
    }
}

fn pace_to_speed(seconds_per_unit: f64, meters_per_unit: f64) -> Option<f64> {
    (seconds_per_unit > 0.0).then(|| meters_per_unit / seconds_per_unit)
}

/// One candidate key for a metric
#[derive(Debug, Clone, Copy)]
pub struct FieldCandidate {
    /// Record key
    pub key: &'static str,
    /// Unit conversion to apply to the raw value
    pub conversion: Conversion,
}

/// Candidate read without conversion
#[must_use]
pub const fn field(key: &'static str) -> FieldCandidate {
    FieldCandidate {
        key,
        conversion: Conversion::Identity,
    }
}

/// Candidate read through a unit conversion
#[must_use]
pub const fn converted(key: &'static str, conversion: Conversion) -> FieldCandidate {
    FieldCandidate { key, conversion }
}

/// Seconds since activity start
pub const RELATIVE_TIME: &[FieldCandidate] = &[
    field("time"),
    field("elapsed"),
    field("elapsedSeconds"),
    field("elapsed_seconds"),
    field("elapsedTime"),
    field("elapsed_time"),
    field("offsetSeconds"),
    field("offset"),
    field("t"),
];

/// Absolute timestamps (epoch seconds, epoch milliseconds or RFC 3339)
pub const ABSOLUTE_TIME_KEYS: &[&str] = &[
    "timestamp",
    "dateTime",
    "date_time",
    "recordedAt",
    "recorded_at",
    "startTimeInSeconds",
];

/// Latitude in degrees
pub const LATITUDE: &[FieldCandidate] = &[field("lat"), field("latitude")];

/// Longitude in degrees
pub const LONGITUDE: &[FieldCandidate] = &[
    field("lng"),
    field("lon"),
    field("long"),
    field("longitude"),
];

/// `[lat, lng]` pair keys
pub const LAT_LNG_PAIR_KEYS: &[&str] = &["latlng", "latLng", "position", "point"];

/// Heart rate in BPM
pub const HEART_RATE: &[FieldCandidate] = &[
    field("heartRate"),
    field("heart_rate"),
    field("heartrate"),
    field("hr"),
    field("bpm"),
    field("avgHeartRate"),
    field("averageHeartRate"),
];

/// Speed; explicit m/s fields before km/h, km/h before pace conversions
pub const SPEED: &[FieldCandidate] = &[
    field("instantSpeed"),
    field("instant_speed"),
    field("speedMps"),
    field("speed_mps"),
    field("enhancedSpeed"),
    field("velocity_smooth"),
    field("velocity"),
    field("speed"),
    converted("speedKph", Conversion::KphToMps),
    converted("speed_kph", Conversion::KphToMps),
    converted("speedKmh", Conversion::KphToMps),
    converted("speed_kmh", Conversion::KphToMps),
    converted("paceSecondsPerKm", Conversion::SecondsPerKmToMps),
    converted("pace_seconds_per_km", Conversion::SecondsPerKmToMps),
    converted("paceSecondsPerMile", Conversion::SecondsPerMileToMps),
    converted("pace_seconds_per_mile", Conversion::SecondsPerMileToMps),
    converted("paceMinPerKm", Conversion::MinutesPerKmToMps),
    converted("pace_min_per_km", Conversion::MinutesPerKmToMps),
];

/// Provider cumulative distance; meters before kilometers
pub const CUMULATIVE_DISTANCE: &[FieldCandidate] = &[
    field("cumulativeDistance"),
    field("cumulative_distance"),
    field("distanceMeters"),
    field("distance_meters"),
    field("totalDistance"),
    field("distance"),
    converted("distanceKm", Conversion::KilometersToMeters),
    converted("distance_km", Conversion::KilometersToMeters),
];

/// Instantaneous power in watts
pub const POWER: &[FieldCandidate] = &[
    field("power"),
    field("watts"),
    field("powerWatts"),
    field("power_watts"),
];

/// Read a JSON value as a finite number, accepting numeric strings
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Resolve a metric from a record: first present, convertible candidate wins
#[must_use]
pub fn resolve(record: &Record, candidates: &[FieldCandidate]) -> Option<f64> {
    candidates.iter().find_map(|candidate| {
        record
            .get(candidate.key)
            .and_then(as_number)
            .and_then(|raw| candidate.conversion.apply(raw))
    })
}

/// Resolve a non-negative metric (speed, distance, power)
#[must_use]
pub fn resolve_non_negative(record: &Record, candidates: &[FieldCandidate]) -> Option<f64> {
    candidates.iter().find_map(|candidate| {
        record
            .get(candidate.key)
            .and_then(as_number)
            .and_then(|raw| candidate.conversion.apply(raw))
            .filter(|value| *value >= 0.0)
    })
}

/// Resolve a GPS position from separate keys or a `[lat, lng]` pair
#[must_use]
pub fn resolve_position(record: &Record) -> Option<GeoPoint> {
    if let (Some(lat), Some(lng)) = (resolve(record, LATITUDE), resolve(record, LONGITUDE)) {
        let point = GeoPoint::new(lat, lng);
        if point.is_valid() {
            return Some(point);
        }
    }
    LAT_LNG_PAIR_KEYS.iter().find_map(|key| match record.get(*key) {
        Some(Value::Array(pair)) if pair.len() == 2 => {
            let point = GeoPoint::new(as_number(&pair[0])?, as_number(&pair[1])?);
            point.is_valid().then_some(point)
        }
        Some(Value::Object(inner)) => {
            let point = GeoPoint::new(resolve(inner, LATITUDE)?, resolve(inner, LONGITUDE)?);
            point.is_valid().then_some(point)
        }
        _ => None,
    })
}

/// Time of a record before rebasing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawTime {
    /// Seconds since activity start
    Relative(f64),
    /// Wall-clock instant
    Absolute(DateTime<Utc>),
}

/// Parse an absolute timestamp value
///
/// Numbers above 1e11 are epoch milliseconds, other numbers epoch seconds;
/// strings are RFC 3339.
#[must_use]
pub fn parse_absolute(value: &Value) -> Option<DateTime<Utc>> {
    if let Value::String(text) = value {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text.trim()) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    let epoch = as_number(value)?;
    if epoch.abs() > 1e11 {
        Utc.timestamp_millis_opt(epoch.round() as i64).single()
    } else {
        let whole = epoch.trunc();
        let nanos = ((epoch - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
        Utc.timestamp_opt(whole as i64, nanos).single()
    }
}

/// Resolve a record's time: relative keys first, then absolute keys
///
/// A relative key holding an RFC 3339 string is read as absolute.
#[must_use]
pub fn resolve_time(record: &Record) -> Option<RawTime> {
    for candidate in RELATIVE_TIME {
        let Some(value) = record.get(candidate.key) else {
            continue;
        };
        if let Value::String(text) = value {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text.trim()) {
                return Some(RawTime::Absolute(parsed.with_timezone(&Utc)));
            }
        }
        if let Some(seconds) = as_number(value) {
            return Some(RawTime::Relative(seconds));
        }
    }
    ABSOLUTE_TIME_KEYS
        .iter()
        .find_map(|key| record.get(*key).and_then(parse_absolute))
        .map(RawTime::Absolute)
}
