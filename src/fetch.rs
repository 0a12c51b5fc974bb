// ABOUTME: Upstream telemetry polling with bounded retries and multiplicative backoff
// ABOUTME: Distinguishes a populated payload from server-side computation still pending
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Telemetry polling
//!
//! The activity store may answer before server-side processing has finished.
//! [`poll_for_telemetry`] retries a small fixed number of times and reports
//! [`PollOutcome::StillComputing`] instead of handing a partial payload to the
//! engine as if it were final.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reconcile_core::errors::{AppError, AppResult};
use reconcile_core::models::CompletedWorkout;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::time::sleep;
use tracing::{debug, info};

/// Source of completed-workout telemetry
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetch the completed workout; `None` when the store has nothing yet
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or answers malformed data
    async fn fetch_completed(&self, workout_id: &str) -> AppResult<Option<CompletedWorkout>>;
}

/// Read and parse a JSON document
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse as `T`
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("cannot read {}: {e}", path.display())).with_source(e)
    })?;
    serde_json::from_str(&content).map_err(|e| {
        AppError::invalid_format(format!("{} is not valid JSON: {e}", path.display()))
            .with_source(e)
    })
}

/// Telemetry exported to a JSON file by another process
///
/// A missing or still-empty file means the export has not finished.
#[derive(Debug, Clone)]
pub struct FileTelemetrySource {
    path: PathBuf,
}

impl FileTelemetrySource {
    /// Source reading `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TelemetrySource for FileTelemetrySource {
    async fn fetch_completed(&self, workout_id: &str) -> AppResult<Option<CompletedWorkout>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => serde_json::from_str(&content).map(Some).map_err(|e| {
                AppError::invalid_format(format!("telemetry for {workout_id} is malformed: {e}"))
                    .with_source(e)
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::invalid_input(format!(
                "cannot read {}: {e}",
                self.path.display()
            ))
            .with_source(e)),
        }
    }
}

/// Retry schedule for [`poll_for_telemetry`]
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Total fetch attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub initial_delay: Duration,
    /// Factor applied to the delay after each attempt
    pub backoff_multiplier: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(2),
            backoff_multiplier: 1.5,
        }
    }
}

impl PollConfig {
    /// Delay before attempt `attempt + 1`, where `attempt` starts at 1
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        self.initial_delay
            .mul_f64(self.backoff_multiplier.max(1.0).powi(exponent))
    }
}

/// Result of polling
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// A populated payload is ready for the engine
    Ready(CompletedWorkout),
    /// Attempts exhausted without a populated payload
    StillComputing,
}

/// Poll `source` until a populated payload appears or attempts run out
///
/// # Errors
///
/// Propagates fetch errors; an empty or missing payload is not an error
pub async fn poll_for_telemetry(
    source: &dyn TelemetrySource,
    workout_id: &str,
    config: &PollConfig,
) -> AppResult<PollOutcome> {
    if config.max_attempts == 0 {
        return Err(AppError::config("poll max_attempts must be at least 1"));
    }

    for attempt in 1..=config.max_attempts {
        match source.fetch_completed(workout_id).await? {
            Some(workout) if workout.is_populated() => {
                info!(workout_id, attempt, "telemetry ready");
                return Ok(PollOutcome::Ready(workout));
            }
            Some(_) => debug!(workout_id, attempt, "telemetry payload not populated yet"),
            None => debug!(workout_id, attempt, "telemetry not available yet"),
        }

        if attempt < config.max_attempts {
            let delay = config.delay_after(attempt);
            info!(
                workout_id,
                attempt,
                max_attempts = config.max_attempts,
                delay_secs = delay.as_secs_f64(),
                "telemetry still computing; retrying"
            );
            sleep(delay).await;
        }
    }

    info!(
        workout_id,
        attempts = config.max_attempts,
        "telemetry still computing after all attempts"
    );
    Ok(PollOutcome::StillComputing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_schedule() {
        let config = PollConfig::default();
        assert_eq!(config.delay_after(1), Duration::from_secs(2));
        assert_eq!(config.delay_after(2), Duration::from_secs(3));
    }
}
