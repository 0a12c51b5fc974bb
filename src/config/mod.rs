// ABOUTME: Configuration module for the reconciliation engine
// ABOUTME: Threshold groups with environment overrides, validation and a cached global instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine configuration
//!
//! Every heuristic threshold the pipeline uses lives in [`ReconcileConfig`].
//! Defaults come from `reconcile_core::constants`; each value can be overridden
//! with a `RECONCILE_*` environment variable.

/// Configuration error types
pub mod error;
/// Threshold groups and loading logic
pub mod reconcile;

pub use error::ConfigError;
pub use reconcile::{
    AccumulatorConfig, AggregatorConfig, PoolConfig, ReconcileConfig, ResolverConfig,
    SampleConfig, SegmenterConfig,
};
