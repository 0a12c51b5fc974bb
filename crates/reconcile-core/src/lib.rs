// ABOUTME: Core types and constants for the planned-vs-executed workout reconciliation engine
// ABOUTME: Foundation crate with error handling, unit constants, and the workout data model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Reconcile Core
//!
//! Foundation crate providing shared types and constants for the workout
//! reconciliation engine. This crate is designed to change infrequently, so the
//! engine crate can iterate on algorithms without touching the data contract.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the data-quality taxonomy
//! - **constants**: Unit conversion factors and sanity limits
//! - **models**: Samples, planned workouts, completed telemetry, and executed intervals

/// Unified error handling system with standard error codes
pub mod errors;

/// Unit conversion constants and plausibility limits
pub mod constants;

/// Core data models (Sample, PlannedStep, ExecutedInterval, SportType, ...)
pub mod models;
