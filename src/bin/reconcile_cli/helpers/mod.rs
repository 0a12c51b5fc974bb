// ABOUTME: Re-exports helper modules for workout-reconcile
// ABOUTME: Provides access to display utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
