// ABOUTME: Synthesizes samples from per-pool-length swim records when no per-sample telemetry exists
// ABOUTME: One sample per length at cumulative elapsed time carrying that length's own average speed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reconcile_core::errors::AppResult;
use reconcile_core::models::{CompletedWorkout, Sample};
use serde_json::Value;
use tracing::debug;

use super::container_records;
use super::fields::{self, FieldCandidate, Record};
use crate::resolver::pool::pool_length_meters;

const LENGTH_DURATION: &[FieldCandidate] = &[
    fields::field("elapsedTime"),
    fields::field("elapsed_time"),
    fields::field("totalElapsedTime"),
    fields::field("total_elapsed_time"),
    fields::field("duration"),
    fields::field("durationSeconds"),
    fields::field("duration_seconds"),
    fields::field("timerTime"),
];

const LENGTH_DISTANCE: &[FieldCandidate] = &[
    fields::field("distance"),
    fields::field("distanceMeters"),
    fields::field("distance_meters"),
    fields::field("lengthMeters"),
];

const LENGTH_TYPE_KEYS: &[&str] = &["lengthType", "length_type", "type"];

/// One parsed pool length
#[derive(Debug, Clone, Copy)]
struct PoolLengthRecord {
    duration: f64,
    distance: Option<f64>,
    heart_rate: Option<f64>,
    idle: bool,
}

fn is_idle(record: &Record) -> bool {
    let typed_idle = LENGTH_TYPE_KEYS.iter().any(|key| {
        record
            .get(*key)
            .and_then(Value::as_str)
            .is_some_and(|kind| matches!(kind.to_lowercase().as_str(), "idle" | "rest"))
    });
    let inactive = record.get("active").and_then(Value::as_bool) == Some(false);
    typed_idle || inactive
}

fn parse_length(record: &Record, fallback_length: Option<f64>) -> Option<PoolLengthRecord> {
    let duration = fields::resolve_non_negative(record, LENGTH_DURATION).filter(|d| *d > 0.0)?;
    let idle = is_idle(record);
    let distance = if idle {
        None
    } else {
        fields::resolve_non_negative(record, LENGTH_DISTANCE)
            .filter(|d| *d > 0.0)
            .or(fallback_length)
    };
    Some(PoolLengthRecord {
        duration,
        distance,
        heart_rate: fields::resolve(record, fields::HEART_RATE),
        idle,
    })
}

/// Build samples from swim length records
///
/// A zero-time origin sample is prepended. Idle lengths advance time only.
/// Cumulative distance is carried only when at least one length has a known
/// distance, so an unknown pool never turns into a fabricated zero.
///
/// # Errors
///
/// Returns `InvalidFormat` when the container has an impossible shape
pub fn samples_from_lengths(workout: &CompletedWorkout, lengths: &Value) -> AppResult<Vec<Sample>> {
    let fallback_length = pool_length_meters(workout);
    let records = container_records(lengths, "swimLengths")?;
    let parsed: Vec<PoolLengthRecord> = records
        .iter()
        .filter_map(|record| parse_length(record, fallback_length))
        .collect();

    if parsed.len() < records.len() {
        debug!(
            skipped = records.len() - parsed.len(),
            "skipped swim lengths without a positive duration"
        );
    }
    if parsed.is_empty() {
        return Ok(Vec::new());
    }

    let has_distance = parsed.iter().any(|length| length.distance.is_some());
    let mut samples = Vec::with_capacity(parsed.len() + 1);
    let mut origin = Sample::at(0.0);
    if has_distance {
        origin.cumulative_distance = Some(0.0);
    }
    samples.push(origin);

    let mut elapsed = 0.0;
    let mut covered = 0.0;
    for length in parsed {
        elapsed += length.duration;
        let mut sample = Sample::at(elapsed);
        sample.heart_rate = length.heart_rate;
        if let Some(distance) = length.distance {
            covered += distance;
            sample.instant_speed = Some(distance / length.duration);
        }
        if has_distance && (length.idle || length.distance.is_some()) {
            sample.cumulative_distance = Some(covered);
        }
        samples.push(sample);
    }

    debug!(
        lengths = samples.len() - 1,
        elapsed, covered, "synthesized samples from swim lengths"
    );
    Ok(samples)
}
