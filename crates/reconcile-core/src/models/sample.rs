// ABOUTME: Normalized telemetry sample produced by the sample normalizer
// ABOUTME: One instant of recorded telemetry keyed by seconds since activity start
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// GPS fix in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new GPS fix
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both coordinates are finite and inside their valid ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// One instant of recorded telemetry
///
/// The sequence produced by the normalizer is sorted ascending by `time` with
/// no duplicate timestamps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds elapsed since activity start
    pub time: f64,
    /// GPS position, if recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<GeoPoint>,
    /// Heart rate in BPM, already filtered to the plausible range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Instantaneous speed in m/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_speed: Option<f64>,
    /// Provider-reported cumulative distance in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_distance: Option<f64>,
    /// Instantaneous power in watts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
}

impl Sample {
    /// Create an empty sample at the given elapsed time
    #[must_use]
    pub fn at(time: f64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    /// Set the GPS position
    #[must_use]
    pub fn with_position(mut self, lat: f64, lng: f64) -> Self {
        self.position = Some(GeoPoint::new(lat, lng));
        self
    }

    /// Set the heart rate
    #[must_use]
    pub fn with_heart_rate(mut self, bpm: f64) -> Self {
        self.heart_rate = Some(bpm);
        self
    }

    /// Set the instantaneous speed
    #[must_use]
    pub fn with_speed(mut self, meters_per_second: f64) -> Self {
        self.instant_speed = Some(meters_per_second);
        self
    }

    /// Set the provider cumulative distance
    #[must_use]
    pub fn with_distance(mut self, meters: f64) -> Self {
        self.cumulative_distance = Some(meters);
        self
    }

    /// Set the instantaneous power
    #[must_use]
    pub fn with_power(mut self, watts: f64) -> Self {
        self.power = Some(watts);
        self
    }
}
