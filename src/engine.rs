// ABOUTME: Reconciliation engine running normalize, accumulate, resolve, segment and aggregate in one pass
// ABOUTME: Handles the precomputed-interval bypass, empty plan/telemetry outcomes and parallel batches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Reconciliation Engine
//!
//! A pure, synchronous computation over an already-fetched planned workout and
//! completed workout. Within one pairing the segmenter cursor is strictly
//! sequential; independent pairings run in parallel in
//! [`ReconciliationEngine::reconcile_batch`].

use rayon::prelude::*;
use reconcile_core::errors::{AppResult, DataIssue};
use reconcile_core::models::{
    CompletedWorkout, EffortFamily, ExecutedInterval, IntervalStatus, PlannedWorkout, PoolLength,
    SportType,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::aggregator::{aggregate, AggregationContext};
use crate::config::ReconcileConfig;
use crate::distance::accumulate;
use crate::resolver::pool::infer_pool;
use crate::resolver::{resolve_plan, StepSource};
use crate::segmenter::{segment, StepSegment};
use crate::telemetry::normalize;

/// Per-step comparison of a planned workout against its telemetry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutComparison {
    /// Sport of the completed workout
    pub sport: SportType,
    /// Whether steps came from the plan or were derived from its text
    pub step_source: StepSource,
    /// Inferred pool for swim workouts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolLength>,
    /// Seconds of leading idle time excluded before the first step
    pub trimmed_seconds: f64,
    /// One interval per planned step, in planned order
    pub intervals: Vec<ExecutedInterval>,
}

impl WorkoutComparison {
    /// Whether at least one step was matched against telemetry
    ///
    /// When false the caller shows "no comparison available" instead of a
    /// table of placeholders.
    #[must_use]
    pub fn has_measurements(&self) -> bool {
        self.intervals
            .iter()
            .any(|interval| interval.status == IntervalStatus::Measured)
    }
}

/// Outcome of one reconciliation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum Reconciliation {
    /// Per-step comparison
    Compared(WorkoutComparison),
    /// The server already computed intervals; prefer them
    Precomputed(Vec<Value>),
    /// No steps could be resolved from the plan
    NoPlan,
    /// The workout has no samples at all
    NoTelemetry,
}

impl Reconciliation {
    /// Intervals when a comparison was produced
    #[must_use]
    pub fn intervals(&self) -> &[ExecutedInterval] {
        match self {
            Self::Compared(comparison) => &comparison.intervals,
            Self::Precomputed(_) | Self::NoPlan | Self::NoTelemetry => &[],
        }
    }
}

/// Reconciles planned workouts against completed workouts
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    config: ReconcileConfig,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new(ReconcileConfig::global().clone())
    }
}

impl ReconciliationEngine {
    /// Create an engine with explicit thresholds
    #[must_use]
    pub const fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Reconcile one planned workout against one completed workout
    ///
    /// # Errors
    ///
    /// Returns an error only when a telemetry container has an impossible shape.
    /// Sparse or implausible data degrades the result instead.
    pub fn reconcile(
        &self,
        plan: &PlannedWorkout,
        workout: &CompletedWorkout,
    ) -> AppResult<Reconciliation> {
        if let Some(precomputed) = workout.precomputed_intervals() {
            debug!(
                intervals = precomputed.len(),
                "server-computed intervals present; skipping engine"
            );
            return Ok(Reconciliation::Precomputed(precomputed.to_vec()));
        }

        let resolved = resolve_plan(plan, &self.config.resolver);
        if resolved.is_empty() {
            return Ok(Reconciliation::NoPlan);
        }

        let samples = normalize(workout, &self.config.samples)?;
        if samples.is_empty() {
            return Ok(Reconciliation::NoTelemetry);
        }

        let accumulated = accumulate(&samples, &self.config.samples, &self.config.accumulator);
        let segmentation = segment(
            &accumulated,
            &resolved.steps,
            resolved.typical_distance,
            &self.config.segmenter,
        );

        let sport = workout.sport_type();
        let family = sport.effort_family();
        let pool = (family == EffortFamily::SwimPace)
            .then(|| infer_pool(workout, &self.config.pool));
        let ctx = AggregationContext {
            family,
            pool: pool.unwrap_or_else(PoolLength::unknown),
            config: &self.config,
        };

        let intervals = resolved
            .steps
            .iter()
            .zip(&segmentation.segments)
            .enumerate()
            .map(|(index, (step, outcome))| match outcome {
                StepSegment::Matched(slice) => aggregate(index, step, slice, &accumulated, &ctx),
                StepSegment::Unresolvable => ExecutedInterval::unresolvable(index, step),
                StepSegment::BeyondTelemetry => {
                    let mut interval =
                        ExecutedInterval::empty(index, step, IntervalStatus::BeyondTelemetry);
                    interval.note(DataIssue::EmptyTelemetry);
                    interval
                }
            })
            .collect();

        let first_active = segmentation.first_active_index;
        let trimmed_seconds = accumulated
            .get(first_active)
            .zip(accumulated.first())
            .map_or(0.0, |(active, first)| active.time() - first.time());

        Ok(Reconciliation::Compared(WorkoutComparison {
            sport,
            step_source: resolved.source,
            pool,
            trimmed_seconds,
            intervals,
        }))
    }

    /// Reconcile independent pairs in parallel, preserving input order
    #[must_use]
    pub fn reconcile_batch(
        &self,
        pairs: &[(PlannedWorkout, CompletedWorkout)],
    ) -> Vec<AppResult<Reconciliation>> {
        let results: Vec<AppResult<Reconciliation>> = pairs
            .par_iter()
            .map(|(plan, workout)| self.reconcile(plan, workout))
            .collect();

        let compared = results
            .iter()
            .filter(|result| matches!(result, Ok(Reconciliation::Compared(_))))
            .count();
        let failed = results.iter().filter(|result| result.is_err()).count();
        info!(
            pairs = pairs.len(),
            compared, failed, "reconciled workout batch"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reconcile_core::models::{PlannedStep, StepKind};
    use serde_json::json;

    #[test]
    fn test_precomputed_intervals_take_precedence() {
        let mut workout = CompletedWorkout::new("run");
        workout.server_computed_intervals = Some(vec![json!({"distance": 400})]);
        let engine = ReconciliationEngine::new(ReconcileConfig::default());
        let outcome = engine
            .reconcile(&PlannedWorkout::default(), &workout)
            .unwrap();
        assert!(matches!(outcome, Reconciliation::Precomputed(ref v) if v.len() == 1));
    }

    #[test]
    fn test_missing_samples_is_no_telemetry() {
        let plan = PlannedWorkout::from_steps(vec![PlannedStep::duration(StepKind::Work, 60.0)]);
        let engine = ReconciliationEngine::new(ReconcileConfig::default());
        let outcome = engine
            .reconcile(&plan, &CompletedWorkout::new("run"))
            .unwrap();
        assert_eq!(outcome, Reconciliation::NoTelemetry);
        assert!(outcome.intervals().is_empty());
    }
}
