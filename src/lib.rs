// ABOUTME: Main library entry point for the planned-vs-executed workout reconciliation engine
// ABOUTME: Normalizes telemetry, accumulates distance, segments by planned steps and aggregates metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Workout Reconcile
//!
//! Compares a planned workout (structured steps, or loose text) with the raw
//! sensor stream of the completed workout and reports, per planned step, the
//! distance, time, pace or power and heart rate that were actually executed.
//!
//! ## Pipeline
//!
//! - **Normalize**: heterogeneous provider records become one ordered sample stream
//! - **Accumulate**: every sample gets a monotonic cumulative distance
//! - **Resolve**: unstructured plans get steps derived from their text
//! - **Segment**: a single cursor carves the stream into one slice per step
//! - **Aggregate**: each slice becomes an [`ExecutedInterval`]
//!
//! Metrics that the data cannot support are reported as absent, with a
//! [`DataIssue`] explaining why, never as zero or a guess.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use workout_reconcile::engine::{Reconciliation, ReconciliationEngine};
//! use workout_reconcile::errors::AppResult;
//! use workout_reconcile::models::{CompletedWorkout, PlannedStep, PlannedWorkout, StepKind};
//!
//! fn main() -> AppResult<()> {
//!     let plan = PlannedWorkout::from_steps(vec![PlannedStep::distance(StepKind::Work, 1609.34)]);
//!     let workout: CompletedWorkout = serde_json::from_str(r#"{"sport": "run"}"#)?;
//!
//!     match ReconciliationEngine::default().reconcile(&plan, &workout)? {
//!         Reconciliation::Compared(comparison) => println!("{} intervals", comparison.intervals.len()),
//!         other => println!("{other:?}"),
//!     }
//!     Ok(())
//! }
//! ```

/// Metric aggregation for one step slice
pub mod aggregator;

/// Engine thresholds with environment overrides
pub mod config;

/// Cumulative distance derivation
pub mod distance;

/// The end-to-end reconciliation pipeline
pub mod engine;

/// Upstream telemetry polling
pub mod fetch;

/// Display and output formatting
pub mod formatters;

/// Tracing subscriber setup
pub mod logging;

/// Planned-step resolution and pool inference
pub mod resolver;

/// Cursor-driven step segmentation
pub mod segmenter;

/// Sample normalization
pub mod telemetry;

pub use reconcile_core::constants;
pub use reconcile_core::errors;
pub use reconcile_core::errors::DataIssue;
pub use reconcile_core::models;
pub use reconcile_core::models::ExecutedInterval;
