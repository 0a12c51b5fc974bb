// ABOUTME: Raw completed-workout telemetry container supplied by the activity store
// ABOUTME: Keeps provider-shaped sample, GPS and swim-length payloads untouched for the normalizer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SportType;
use crate::constants::units::METERS_PER_KM;

/// Completed workout telemetry in provider shape
///
/// The telemetry containers are kept as raw JSON because field naming differs
/// per provider. Each container may be an array of records or an object of
/// parallel arrays; resolving fields is the normalizer's job.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedWorkout {
    /// Provider sport string ("run", "ride", "swim", "walk", ...)
    #[serde(default)]
    pub sport: String,
    /// Activity start, used to rebase absolute sample timestamps
    #[serde(default, alias = "start_time", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Generic sensor samples
    #[serde(
        default,
        alias = "sensor_samples",
        alias = "streams",
        skip_serializing_if = "Option::is_none"
    )]
    pub samples: Option<Value>,
    /// GPS track
    #[serde(
        default,
        alias = "gps_track",
        alias = "gps",
        alias = "route",
        skip_serializing_if = "Option::is_none"
    )]
    pub gps_track: Option<Value>,
    /// Per-pool-length swim records
    #[serde(
        default,
        alias = "swim_lengths",
        alias = "lengths",
        skip_serializing_if = "Option::is_none"
    )]
    pub swim_lengths: Option<Value>,
    /// Intervals already computed by the server
    #[serde(
        default,
        alias = "server_computed_intervals",
        alias = "computedIntervals",
        skip_serializing_if = "Option::is_none"
    )]
    pub server_computed_intervals: Option<Vec<Value>>,
    /// Explicit pool length
    #[serde(default, alias = "pool_length", skip_serializing_if = "Option::is_none")]
    pub pool_length: Option<f64>,
    /// Unit of `pool_length` ("meters", "yards", ...)
    #[serde(default, alias = "pool_length_unit", skip_serializing_if = "Option::is_none")]
    pub pool_length_unit: Option<String>,
    /// Total distance in meters
    #[serde(
        default,
        alias = "distance",
        alias = "total_distance_meters",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_distance_meters: Option<f64>,
    /// Total distance in kilometers
    #[serde(default, alias = "distance_km", skip_serializing_if = "Option::is_none")]
    pub total_distance_km: Option<f64>,
    /// Number of active pool lengths
    #[serde(
        default,
        alias = "number_of_active_lengths",
        alias = "active_lengths",
        skip_serializing_if = "Option::is_none"
    )]
    pub number_of_active_lengths: Option<u32>,
}

impl CompletedWorkout {
    /// Empty workout for a sport
    #[must_use]
    pub fn new(sport: impl Into<String>) -> Self {
        Self {
            sport: sport.into(),
            ..Self::default()
        }
    }

    /// Parsed sport type
    #[must_use]
    pub fn sport_type(&self) -> SportType {
        SportType::from_provider_string(&self.sport)
    }

    /// Total distance in meters, preferring the meter field
    #[must_use]
    pub fn total_distance(&self) -> Option<f64> {
        self.total_distance_meters
            .or_else(|| self.total_distance_km.map(|km| km * METERS_PER_KM))
            .filter(|meters| meters.is_finite() && *meters > 0.0)
    }

    /// Precomputed intervals, when present and non-empty
    #[must_use]
    pub fn precomputed_intervals(&self) -> Option<&[Value]> {
        self.server_computed_intervals
            .as_deref()
            .filter(|intervals| !intervals.is_empty())
    }

    /// Whether the payload carries anything the engine (or caller) can use
    ///
    /// An unpopulated payload means server-side computation is still pending.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        let has_content = |container: &Option<Value>| match container {
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(columns)) => columns.values().any(|column| match column {
                Value::Array(items) => !items.is_empty(),
                _ => false,
            }),
            _ => false,
        };
        self.precomputed_intervals().is_some()
            || has_content(&self.samples)
            || has_content(&self.gps_track)
            || has_content(&self.swim_lengths)
    }
}
