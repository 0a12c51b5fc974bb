// ABOUTME: Common benchmark utilities and fixtures for reconciliation benchmarks
// ABOUTME: Provides deterministic planned/completed workout generators for Criterion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Common benchmark utilities and fixtures.

pub mod fixtures;
