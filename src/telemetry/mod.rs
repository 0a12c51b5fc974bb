// ABOUTME: Sample normalizer turning heterogeneous provider telemetry into one ordered sample sequence
// ABOUTME: Handles record or column containers, index-merges GPS with sensor streams, and rebases timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sample Normalizer
//!
//! Accepts the raw `samples`, `gpsTrack` and `swimLengths` containers of a
//! [`CompletedWorkout`] and produces a single [`Sample`] sequence sorted by time
//! with no duplicate timestamps.
//!
//! When both a sensor stream and a GPS track are present they are merged by
//! array index, not by interpolated time. Providers do not guarantee matching
//! cadences, so this is a best-effort merge and a known limitation.

/// Prioritized per-metric field registry
pub mod fields;
/// Per-pool-length synthetic samples
pub mod swim;

use chrono::{DateTime, Utc};
use reconcile_core::errors::{AppError, AppResult};
use reconcile_core::models::{CompletedWorkout, Sample};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::SampleConfig;
use fields::{RawTime, Record};

/// Sample before its time has been rebased
#[derive(Debug, Clone)]
struct RawSample {
    time: Option<RawTime>,
    sample: Sample,
}

impl RawSample {
    fn from_record(record: &Record) -> Self {
        let mut sample = Sample::at(0.0);
        sample.position = fields::resolve_position(record);
        sample.heart_rate = fields::resolve(record, fields::HEART_RATE);
        sample.instant_speed = fields::resolve_non_negative(record, fields::SPEED);
        sample.cumulative_distance =
            fields::resolve_non_negative(record, fields::CUMULATIVE_DISTANCE);
        sample.power = fields::resolve_non_negative(record, fields::POWER);
        Self {
            time: fields::resolve_time(record),
            sample,
        }
    }

    /// Fill fields this sample lacks from a GPS record at the same index
    fn merge_gps(&mut self, gps: Self) {
        self.time = self.time.or(gps.time);
        let own = &mut self.sample;
        let other = gps.sample;
        own.position = own.position.or(other.position);
        own.heart_rate = own.heart_rate.or(other.heart_rate);
        own.instant_speed = own.instant_speed.or(other.instant_speed);
        own.cumulative_distance = own.cumulative_distance.or(other.cumulative_distance);
        own.power = own.power.or(other.power);
    }
}

/// Flatten a telemetry container into records
///
/// Accepts an array of objects, or an object of parallel arrays (optionally
/// wrapped as `{"data": [...]}` per column). `null` is an absent container.
///
/// # Errors
///
/// Returns `InvalidFormat` when the container has neither shape or an array
/// element is not an object.
pub fn container_records(container: &Value, name: &str) -> AppResult<Vec<Record>> {
    match container {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(record) => Ok(record.clone()),
                other => Err(AppError::invalid_format(format!(
                    "{name}[{index}] must be an object, found {}",
                    json_kind(other)
                ))),
            })
            .collect(),
        Value::Object(columns) => transpose_columns(columns, name),
        other => Err(AppError::invalid_format(format!(
            "{name} must be an array of records or an object of parallel arrays, found {}",
            json_kind(other)
        ))),
    }
}

fn transpose_columns(columns: &Map<String, Value>, name: &str) -> AppResult<Vec<Record>> {
    let arrays: Vec<(&String, &Vec<Value>)> = columns
        .iter()
        .filter_map(|(key, column)| match column {
            Value::Array(values) => Some((key, values)),
            Value::Object(wrapper) => match wrapper.get("data") {
                Some(Value::Array(values)) => Some((key, values)),
                _ => None,
            },
            _ => None,
        })
        .collect();

    if arrays.is_empty() {
        return Err(AppError::invalid_format(format!(
            "{name} object has no array columns"
        )));
    }

    let rows = arrays.iter().map(|(_, values)| values.len()).max().unwrap_or(0);
    let records = (0..rows)
        .map(|row| {
            arrays
                .iter()
                .filter_map(|(key, values)| {
                    values
                        .get(row)
                        .filter(|value| !value.is_null())
                        .map(|value| ((*key).clone(), value.clone()))
                })
                .collect::<Record>()
        })
        .collect();
    Ok(records)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_container(container: Option<&Value>, name: &str) -> AppResult<Vec<RawSample>> {
    let Some(container) = container else {
        return Ok(Vec::new());
    };
    Ok(container_records(container, name)?
        .iter()
        .map(RawSample::from_record)
        .collect())
}

/// Combine the sensor stream and GPS track by array position
fn merge_by_index(sensor: Vec<RawSample>, gps: Vec<RawSample>) -> Vec<RawSample> {
    if gps.is_empty() {
        return sensor;
    }
    if sensor.is_empty() {
        return gps;
    }
    debug!(
        sensor = sensor.len(),
        gps = gps.len(),
        "merging sensor stream and GPS track by index"
    );
    let mut gps = gps.into_iter();
    let mut merged: Vec<RawSample> = sensor
        .into_iter()
        .map(|mut raw| {
            if let Some(fix) = gps.next() {
                raw.merge_gps(fix);
            }
            raw
        })
        .collect();
    merged.extend(gps);
    merged
}

/// Resolve every raw time to seconds since start, dropping records without one
fn rebase(raw: Vec<RawSample>, start_time: Option<DateTime<Utc>>) -> Vec<Sample> {
    let base = start_time.or_else(|| {
        raw.iter()
            .filter_map(|r| match r.time {
                Some(RawTime::Absolute(instant)) => Some(instant),
                _ => None,
            })
            .min()
    });

    let total = raw.len();
    let samples: Vec<Sample> = raw
        .into_iter()
        .filter_map(|r| {
            let time = match r.time? {
                RawTime::Relative(seconds) => seconds,
                RawTime::Absolute(instant) => {
                    let base = base?;
                    (instant - base).num_milliseconds() as f64 / 1000.0
                }
            };
            Some(Sample { time, ..r.sample })
        })
        .collect();

    if samples.len() < total {
        debug!(
            dropped = total - samples.len(),
            "dropped telemetry records without a usable time"
        );
    }
    samples
}

/// Discard implausible values without clamping
fn sanitize(sample: &mut Sample, config: &SampleConfig) {
    if sample
        .heart_rate
        .is_some_and(|bpm| !config.is_plausible_heart_rate(bpm))
    {
        sample.heart_rate = None;
    }
    if sample.position.is_some_and(|point| !point.is_valid()) {
        sample.position = None;
    }
}

/// Sort ascending by time keeping input order for ties, then drop repeated timestamps
fn order_and_dedupe(mut samples: Vec<Sample>) -> Vec<Sample> {
    samples.sort_by(|a, b| a.time.total_cmp(&b.time));
    let before = samples.len();
    samples.dedup_by(|later, earlier| later.time == earlier.time);
    if samples.len() < before {
        debug!(
            duplicates = before - samples.len(),
            "dropped samples with duplicate timestamps"
        );
    }
    samples
}

/// Normalize a completed workout's telemetry into one ordered sample sequence
///
/// Per-sample telemetry (sensor stream and/or GPS track) is preferred. Swim
/// length records are only used when no per-sample telemetry exists.
///
/// # Errors
///
/// Returns `InvalidFormat` when a container has an impossible shape. Sparse or
/// implausible data never errors.
pub fn normalize(workout: &CompletedWorkout, config: &SampleConfig) -> AppResult<Vec<Sample>> {
    let sensor = parse_container(workout.samples.as_ref(), "samples")?;
    let gps = parse_container(workout.gps_track.as_ref(), "gpsTrack")?;
    let merged = merge_by_index(sensor, gps);

    let mut samples = if merged.is_empty() {
        match workout.swim_lengths.as_ref() {
            Some(lengths) => swim::samples_from_lengths(workout, lengths)?,
            None => Vec::new(),
        }
    } else {
        rebase(merged, workout.start_time)
    };

    samples.retain(|sample| sample.time.is_finite());
    for sample in &mut samples {
        sanitize(sample, config);
    }
    let samples = order_and_dedupe(samples);

    debug!(
        sport = %workout.sport,
        samples = samples.len(),
        "normalized telemetry"
    );
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reconcile_core::errors::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_columns_transposed_into_records() {
        let records = container_records(
            &json!({"time": [0, 1, 2], "heartrate": [120, null, 125], "resolution": "high"}),
            "samples",
        )
        .unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[1].get("heartrate").is_none());
        assert_eq!(records[2]["heartrate"], 125);
    }

    #[test]
    fn test_strava_style_data_wrapper() {
        let records =
            container_records(&json!({"time": {"data": [0, 5]}}), "samples").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_scalar_container_is_malformed() {
        let error = container_records(&json!("nope"), "samples").unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let samples = order_and_dedupe(vec![
            Sample::at(2.0).with_heart_rate(150.0),
            Sample::at(1.0),
            Sample::at(2.0).with_heart_rate(99.0),
        ]);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].heart_rate, Some(150.0));
    }
}
