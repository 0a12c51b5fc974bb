// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Unit conversion factors and plausibility limits for telemetry reconciliation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single large file.

/// Unit conversion and measurement constants
pub mod units;

/// Default plausibility limits for telemetry values
pub mod limits {
    /// Lower bound (exclusive) of a plausible heart rate in BPM
    pub const HEART_RATE_MIN_BPM: f64 = 40.0;
    /// Upper bound (exclusive) of a plausible heart rate in BPM
    pub const HEART_RATE_MAX_BPM: f64 = 230.0;
    /// Speeds below this are stationary/noise (m/s)
    pub const STATIONARY_SPEED_MPS: f64 = 0.3;
    /// Largest sample gap over which speed may be integrated (seconds)
    pub const MAX_SPEED_INTEGRATION_GAP_SECONDS: f64 = 60.0;
    /// Fastest plausible rest/jog speed (m/s)
    pub const REST_MAX_SPEED_MPS: f64 = 8.0;
    /// Fastest plausible derived pace (seconds per mile, 4:00/mi)
    pub const PACE_FASTEST_SECONDS_PER_MILE: f64 = 240.0;
    /// Slowest plausible derived pace (seconds per mile, 20:00/mi)
    pub const PACE_SLOWEST_SECONDS_PER_MILE: f64 = 1200.0;
}

/// Swimming pool geometry
pub mod pool {
    /// A 25-yard pool expressed in meters
    pub const YARD_POOL_METERS: f64 = 22.86;
    /// Common meter pool lengths
    pub const METER_POOL_LENGTHS: [f64; 3] = [25.0, 33.33, 50.0];
    /// Tolerance when matching a yard pool (meters)
    pub const YARD_POOL_TOLERANCE_METERS: f64 = 0.6;
    /// Tolerance when matching a meter pool (meters)
    pub const METER_POOL_TOLERANCE_METERS: f64 = 1.0;
    /// Pace for swimming is expressed per this many distance units
    pub const SWIM_PACE_UNIT_DISTANCE: f64 = 100.0;
}
