// ABOUTME: Planned-step resolver deriving steps for unstructured plans from tokens or descriptions
// ABOUTME: Never overrides a properly structured step list; also owns swim pool-length inference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Planned-Step Resolver
//!
//! Legacy and loosely described plans often carry fewer than a handful of
//! structured steps. For those, a best-effort step list is derived from the
//! compact tokens (`6x400m`, `R2min`, `r180`, ...) and the rendered description.
//! The derived list only replaces the structured one when the structured list
//! is below the configured minimum and the derived list is longer.

/// Pool-length inference for swim workouts
pub mod pool;
/// Token and description parsing
pub mod tokens;

use reconcile_core::models::{PlannedStep, PlannedWorkout};
use serde::Serialize;
use tracing::debug;

use crate::config::ResolverConfig;
use tokens::{parse_plan_text, ParsedPlanText};

/// Where the resolved step list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepSource {
    /// The plan's own structured steps
    Structured,
    /// Steps derived from tokens or description
    Derived,
}

/// Step list ready for segmentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPlan {
    /// Steps in planned order
    pub steps: Vec<PlannedStep>,
    /// Workout-level typical work-interval distance parsed from plan text
    pub typical_distance: Option<f64>,
    /// Where `steps` came from
    pub source: StepSource,
}

impl ResolvedPlan {
    /// Whether there is nothing to compare against
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// All plan text, tokens first, then the rendered description
#[must_use]
pub fn plan_text(plan: &PlannedWorkout) -> String {
    let mut parts: Vec<&str> = plan.tokens.iter().map(String::as_str).collect();
    if let Some(description) = plan.rendered_description.as_deref() {
        parts.push(description);
    }
    parts.join(" ")
}

/// Resolve the step list for a planned workout
#[must_use]
pub fn resolve_plan(plan: &PlannedWorkout, config: &ResolverConfig) -> ResolvedPlan {
    let text = plan_text(plan);
    let parsed = if text.trim().is_empty() {
        ParsedPlanText::default()
    } else {
        parse_plan_text(&text)
    };
    let typical_distance = parsed.typical_distance();

    if plan.steps.len() >= config.structured_step_minimum {
        return ResolvedPlan {
            steps: plan.steps.clone(),
            typical_distance,
            source: StepSource::Structured,
        };
    }

    let derived = parsed.to_steps();
    if derived.len() > plan.steps.len() {
        debug!(
            structured = plan.steps.len(),
            derived = derived.len(),
            "using steps derived from plan text"
        );
        return ResolvedPlan {
            steps: derived,
            typical_distance,
            source: StepSource::Derived,
        };
    }

    ResolvedPlan {
        steps: plan.steps.clone(),
        typical_distance,
        source: StepSource::Structured,
    }
}
