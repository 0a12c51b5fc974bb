// ABOUTME: Sport type enumeration for completed workouts
// ABOUTME: Maps provider sport strings onto the run/ride/swim/walk families the engine understands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Enumeration of sport types relevant to reconciliation
///
/// Provider strings that do not map to a known family are kept verbatim in
/// `Other` and aggregated with the run/walk pace rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SportType {
    /// Running activity (road, trail, treadmill)
    Run,
    /// Cycling activity (outdoor or trainer)
    Ride,
    /// Swimming activity (pool or open water)
    Swim,
    /// Walking or hiking activity
    Walk,
    /// Other activity type not covered by standard categories
    Other(String),
}

/// How an interval's effort is expressed for a sport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffortFamily {
    /// Elapsed seconds per mile
    RunPace,
    /// Average watts, falling back to average speed
    RidePower,
    /// Elapsed seconds per 100 pool units
    SwimPace,
}

impl SportType {
    /// Create `SportType` from a provider string
    ///
    /// Matching is case-insensitive and ignores `_`, `-` and spaces, so
    /// `"VirtualRide"`, `"virtual_ride"` and `"virtual ride"` are equivalent.
    #[must_use]
    pub fn from_provider_string(provider_sport: &str) -> Self {
        let key: String = provider_sport
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "run" | "running" | "trailrun" | "trailrunning" | "virtualrun" | "treadmill"
            | "treadmillrunning" | "track" | "trackrunning" => Self::Run,
            "ride" | "cycling" | "bike" | "biking" | "virtualride" | "indoorcycling"
            | "roadbiking" | "mountainbike" | "mountainbiking" | "gravelride" | "ebikeride" => {
                Self::Ride
            }
            "swim" | "swimming" | "poolswim" | "lapswimming" | "openwater"
            | "openwaterswimming" => Self::Swim,
            "walk" | "walking" | "hike" | "hiking" => Self::Walk,
            _ => Self::Other(provider_sport.to_owned()),
        }
    }

    /// Effort family used by the metric aggregator
    #[must_use]
    pub const fn effort_family(&self) -> EffortFamily {
        match self {
            Self::Ride => EffortFamily::RidePower,
            Self::Swim => EffortFamily::SwimPace,
            Self::Run | Self::Walk | Self::Other(_) => EffortFamily::RunPace,
        }
    }
}

impl fmt::Display for SportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run => f.write_str("run"),
            Self::Ride => f.write_str("ride"),
            Self::Swim => f.write_str("swim"),
            Self::Walk => f.write_str("walk"),
            Self::Other(name) => f.write_str(name),
        }
    }
}
