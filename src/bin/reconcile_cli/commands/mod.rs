// ABOUTME: Re-exports command modules for workout-reconcile
// ABOUTME: Provides access to the compare and pool commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod compare;
pub mod pool;
