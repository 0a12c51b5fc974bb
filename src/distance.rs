// ABOUTME: Distance accumulator deriving a monotonic cumulative distance at every sample
// ABOUTME: Provider distance first, then haversine between GPS fixes, then integrated speed, else nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Distance Accumulator
//!
//! Per consecutive pair of samples the increment comes from the strongest
//! available signal:
//!
//! 1. provider cumulative distance on the current sample
//! 2. great-circle distance between two GPS fixes
//! 3. mean plausible instantaneous speed times a sane time delta
//!
//! When none applies the total holds steady. The signal used is recorded per
//! sample as a [`DistanceSource`] so that a slice with no distance evidence
//! reports an absent distance rather than zero.

use reconcile_core::constants::units::EARTH_RADIUS_METERS;
use reconcile_core::models::{GeoPoint, Sample};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{AccumulatorConfig, SampleConfig};

/// Which signal produced a sample's distance increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceSource {
    /// Provider-reported cumulative distance
    Provider,
    /// Haversine between consecutive GPS fixes
    Geodesic,
    /// Integrated instantaneous speed
    Speed,
    /// No signal; the total held steady
    None,
}

impl DistanceSource {
    /// Whether this increment is backed by a distance signal
    #[must_use]
    pub const fn is_measured(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A sample annotated with its accumulated distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulatedSample {
    /// The normalized sample
    pub sample: Sample,
    /// Meters covered from activity start to this sample
    pub cumulative_distance: f64,
    /// Signal behind the increment that reached this sample
    pub source: DistanceSource,
}

impl AccumulatedSample {
    /// Seconds since activity start
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.sample.time
    }
}

/// Great-circle distance between two fixes in meters
#[must_use]
pub fn haversine_meters(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Mean of the plausible endpoint speeds, if either is plausible
fn integration_speed(prev: &Sample, curr: &Sample, samples: &SampleConfig) -> Option<f64> {
    let plausible = |speed: Option<f64>| speed.filter(|s| samples.is_moving_speed(*s));
    match (plausible(prev.instant_speed), plausible(curr.instant_speed)) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Distance increment from `prev` to `curr` and the signal that produced it
///
/// Returns the new cumulative total. A provider value below `total` would break
/// monotonicity and is ignored in favor of derived signals.
fn step(
    prev: &Sample,
    curr: &Sample,
    total: f64,
    samples: &SampleConfig,
    accumulator: &AccumulatorConfig,
) -> (f64, DistanceSource) {
    if let Some(provider) = curr.cumulative_distance {
        if provider >= total {
            return (provider, DistanceSource::Provider);
        }
        warn!(
            time = curr.time,
            provider, accumulated = total, "provider distance regressed; ignoring it"
        );
    }

    if let (Some(from), Some(to)) = (prev.position, curr.position) {
        return (total + haversine_meters(from, to), DistanceSource::Geodesic);
    }

    let dt = curr.time - prev.time;
    if dt > 0.0 && dt < accumulator.max_speed_integration_gap_seconds {
        if let Some(speed) = integration_speed(prev, curr, samples) {
            return (total + speed * dt, DistanceSource::Speed);
        }
    }

    (total, DistanceSource::None)
}

/// Annotate every sample with a monotonic cumulative distance
#[must_use]
pub fn accumulate(
    samples: &[Sample],
    sample_config: &SampleConfig,
    accumulator: &AccumulatorConfig,
) -> Vec<AccumulatedSample> {
    let Some(first) = samples.first() else {
        return Vec::new();
    };

    let (start, start_source) = first
        .cumulative_distance
        .map_or((0.0, DistanceSource::None), |d| (d, DistanceSource::Provider));

    let mut out = Vec::with_capacity(samples.len());
    out.push(AccumulatedSample {
        sample: first.clone(),
        cumulative_distance: start,
        source: start_source,
    });

    let mut total = start;
    for pair in samples.windows(2) {
        let (next, source) = step(&pair[0], &pair[1], total, sample_config, accumulator);
        total = next;
        out.push(AccumulatedSample {
            sample: pair[1].clone(),
            cumulative_distance: total,
            source,
        });
    }

    debug!(
        samples = out.len(),
        meters = total,
        "accumulated distance"
    );
    out
}
