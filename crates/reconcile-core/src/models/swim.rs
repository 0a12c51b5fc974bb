// ABOUTME: Pool geometry types for swim reconciliation
// ABOUTME: Three-way pool unit classification where Unknown is an explicit absence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::units::METERS_PER_YARD;

/// Distance unit of a swimming pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolUnit {
    /// Yard pool (25 yd = 22.86 m)
    Yards,
    /// Meter pool (25 m, 33.33 m, 50 m)
    Meters,
    /// Could not be inferred; never defaulted
    Unknown,
}

impl PoolUnit {
    /// Meters in one unit, `None` when unknown
    #[must_use]
    pub const fn meters_per_unit(self) -> Option<f64> {
        match self {
            Self::Yards => Some(METERS_PER_YARD),
            Self::Meters => Some(1.0),
            Self::Unknown => None,
        }
    }

    /// Short display suffix, `None` when unknown
    #[must_use]
    pub const fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Yards => Some("yd"),
            Self::Meters => Some("m"),
            Self::Unknown => None,
        }
    }
}

/// Inferred pool length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolLength {
    /// Pool length in meters, when it could be determined
    pub meters: Option<f64>,
    /// Classified unit
    pub unit: PoolUnit,
}

impl PoolLength {
    /// Pool length that could not be determined
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            meters: None,
            unit: PoolUnit::Unknown,
        }
    }
}
