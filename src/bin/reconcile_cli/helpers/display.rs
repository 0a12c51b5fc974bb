// ABOUTME: Output helpers for workout-reconcile
// ABOUTME: Writes results to stdout, keeping logs on stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Shown when polling gave up before the export was populated
pub const STILL_COMPUTING_MESSAGE: &str = "telemetry still computing; try again shortly";

/// Print text followed by exactly one newline
pub fn print_block(text: &str) {
    println!("{}", text.trim_end_matches('\n'));
}
