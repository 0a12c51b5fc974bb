// ABOUTME: Unit conversion constants for distance, time, and speed
// ABOUTME: Provides named constants to eliminate magic numbers in calculations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Meters per kilometer conversion factor
pub const METERS_PER_KM: f64 = 1000.0;

/// Meters per statute mile
pub const METERS_PER_MILE: f64 = 1609.344;

/// Meters per yard
pub const METERS_PER_YARD: f64 = 0.9144;

/// Seconds per minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Seconds per hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Multiply m/s by this to obtain miles per hour
pub const MPS_TO_MPH: f64 = SECONDS_PER_HOUR / METERS_PER_MILE;

/// Multiply m/s by this to obtain kilometers per hour
pub const MPS_TO_KPH: f64 = 3.6;

/// Mean Earth radius used for great-circle distance (meters)
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
