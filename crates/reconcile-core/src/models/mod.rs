// ABOUTME: Core data models for planned workouts, telemetry samples, and executed intervals
// ABOUTME: Re-exports sport, sample, plan, telemetry, swim and interval types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data model shared by the reconciliation pipeline.
//!
//! Inputs are a [`PlannedWorkout`] and a [`CompletedWorkout`]; the output is an
//! ordered list of [`ExecutedInterval`], one per planned step.

/// Executed interval output types
pub mod interval;
/// Planned workout and step types
pub mod plan;
/// Normalized telemetry sample
pub mod sample;
/// Sport classification
pub mod sport;
/// Pool length and unit types
pub mod swim;
/// Raw completed-workout telemetry container
pub mod telemetry;

pub use interval::{Adherence, ExecutedInterval, IntervalEffort, IntervalStatus, PaceBasis};
pub use plan::{PaceRange, PlannedStep, PlannedWorkout, PowerRange, StepBound, StepKind};
pub use sample::{GeoPoint, Sample};
pub use sport::{EffortFamily, SportType};
pub use swim::{PoolLength, PoolUnit};
pub use telemetry::CompletedWorkout;
