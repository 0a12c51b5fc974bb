// ABOUTME: Parses compact plan tokens and free-text descriptions into approximate planned steps
// ABOUTME: Extracts warm-up/cool-down minutes, rest durations and <count>x<value><unit> work intervals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::LazyLock;

use regex::{Captures, Regex};
use reconcile_core::constants::units::{
    METERS_PER_KM, METERS_PER_MILE, METERS_PER_YARD, SECONDS_PER_MINUTE,
};
use reconcile_core::models::{PlannedStep, StepKind};
use serde::Serialize;

/// Regex patterns for plan text
/// Stored as Option to handle compilation failures gracefully (should never fail for static patterns)
static WARMUP_AFTER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: WU 10min, warm-up: 15, warmup 12'
    Regex::new(r"(?i)\b(?:wu|warm[\s_-]?up)\b\s*:?\s*(\d+(?:\.\d+)?)\s*([a-z]+\b|'|)(?:[\s,;.)/+]|$)")
        .ok()
});

static WARMUP_BEFORE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 10min WU, 15 minute warm-up
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*([a-z]+\b|'|)[\s-]*(?:wu|warm[\s_-]?up)\b").ok()
});

static COOLDOWN_AFTER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: CD 10min, cool-down: 5
    Regex::new(r"(?i)\b(?:cd|cool[\s_-]?down)\b\s*:?\s*(\d+(?:\.\d+)?)\s*([a-z]+\b|'|)(?:[\s,;.)/+]|$)")
        .ok()
});

static COOLDOWN_BEFORE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 10min CD, 5 minute cooldown
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*([a-z]+\b|'|)[\s-]*(?:cd|cool[\s_-]?down)\b").ok()
});

static REST: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: R2min, r180, R90-120s, rest 2 min, recovery 60-90 sec
    Regex::new(
        r"(?i)\b(?:r|rest|rec|recovery)\s*:?\s*(\d+(?:\.\d+)?)(?:\s*(?:-|to)\s*(\d+(?:\.\d+)?))?\s*([a-z]+\b|'|\x22|)",
    )
    .ok()
});

static INTERVALS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 6x400m, 4 x 1 mile, 5×3min, 8x200
    Regex::new(r"(?i)\b(\d{1,2})\s*[x×]\s*(\d+(?:\.\d+)?)\s*([a-z]+\b|'|)").ok()
});

/// What a parsed value measures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Quantity {
    /// Meters
    Meters(f64),
    /// Seconds
    Seconds(f64),
}

/// Repeated work interval, e.g. `6x400m`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntervalSet {
    /// Number of repetitions
    pub count: u32,
    /// Size of one repetition
    pub each: Quantity,
}

/// Everything extracted from plan text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedPlanText {
    /// Warm-up length in seconds
    pub warmup_seconds: Option<f64>,
    /// Cool-down length in seconds
    pub cooldown_seconds: Option<f64>,
    /// Rest between repetitions in seconds (a range is averaged)
    pub rest_seconds: Option<f64>,
    /// First repeated work interval
    pub intervals: Option<IntervalSet>,
}

impl ParsedPlanText {
    /// Representative work-interval distance in meters
    #[must_use]
    pub fn typical_distance(&self) -> Option<f64> {
        match self.intervals?.each {
            Quantity::Meters(meters) => Some(meters),
            Quantity::Seconds(_) => None,
        }
    }

    /// Whether nothing usable was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warmup_seconds.is_none()
            && self.cooldown_seconds.is_none()
            && self.intervals.is_none()
    }

    /// Expand into steps: warm-up, repetitions with rest between them, cool-down
    #[must_use]
    pub fn to_steps(&self) -> Vec<PlannedStep> {
        let mut steps = Vec::new();
        if let Some(seconds) = self.warmup_seconds {
            steps.push(PlannedStep::duration(StepKind::Warmup, seconds));
        }
        if let Some(set) = self.intervals {
            for rep in 0..set.count {
                if rep > 0 {
                    if let Some(rest) = self.rest_seconds {
                        steps.push(PlannedStep::duration(StepKind::Rest, rest));
                    }
                }
                steps.push(match set.each {
                    Quantity::Meters(meters) => PlannedStep::distance(StepKind::Work, meters),
                    Quantity::Seconds(seconds) => PlannedStep::duration(StepKind::Work, seconds),
                });
            }
        }
        if let Some(seconds) = self.cooldown_seconds {
            steps.push(PlannedStep::duration(StepKind::Cooldown, seconds));
        }
        steps
    }
}

fn number(captures: &Captures<'_>, group: usize) -> Option<f64> {
    captures
        .get(group)?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

fn unit(captures: &Captures<'_>, group: usize) -> String {
    captures
        .get(group)
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_default()
}

/// Warm-up/cool-down value to seconds; a bare number or `m` up to an hour is minutes
fn minutes_to_seconds(value: f64, unit: &str) -> Option<f64> {
    match unit {
        "" | "min" | "mins" | "minute" | "minutes" | "'" => Some(value * SECONDS_PER_MINUTE),
        "m" if value <= 60.0 => Some(value * SECONDS_PER_MINUTE),
        "s" | "sec" | "secs" | "second" | "seconds" => Some(value),
        _ => None,
    }
}

/// Rest value to seconds; a bare number is seconds, `m` up to ten is minutes
fn rest_to_seconds(value: f64, unit: &str) -> Option<f64> {
    match unit {
        "" | "s" | "sec" | "secs" | "second" | "seconds" | "\"" => Some(value),
        "min" | "mins" | "minute" | "minutes" | "'" => Some(value * SECONDS_PER_MINUTE),
        "m" if value <= 10.0 => Some(value * SECONDS_PER_MINUTE),
        _ => None,
    }
}

/// Work repetition size; a bare number is meters
fn interval_quantity(value: f64, unit: &str) -> Option<Quantity> {
    let quantity = match unit {
        "" | "m" | "meter" | "meters" | "metre" | "metres" => Quantity::Meters(value),
        "k" | "km" | "kilometer" | "kilometers" => Quantity::Meters(value * METERS_PER_KM),
        "mi" | "mile" | "miles" => Quantity::Meters(value * METERS_PER_MILE),
        "y" | "yd" | "yds" | "yard" | "yards" => Quantity::Meters(value * METERS_PER_YARD),
        "min" | "mins" | "minute" | "minutes" | "'" => {
            Quantity::Seconds(value * SECONDS_PER_MINUTE)
        }
        "s" | "sec" | "secs" | "second" | "seconds" => Quantity::Seconds(value),
        _ => return None,
    };
    Some(quantity)
}

fn first_minutes(text: &str, patterns: [&LazyLock<Option<Regex>>; 2]) -> Option<f64> {
    patterns.into_iter().find_map(|pattern| {
        pattern.as_ref()?.captures_iter(text).find_map(|captures| {
            minutes_to_seconds(number(&captures, 1)?, &unit(&captures, 2))
        })
    })
}

fn rest_seconds(text: &str) -> Option<f64> {
    REST.as_ref()?.captures_iter(text).find_map(|captures| {
        let low = number(&captures, 1)?;
        let value = number(&captures, 2).map_or(low, |high| (low + high) / 2.0);
        rest_to_seconds(value, &unit(&captures, 3))
    })
}

fn interval_set(text: &str) -> Option<IntervalSet> {
    INTERVALS.as_ref()?.captures_iter(text).find_map(|captures| {
        let count = captures.get(1)?.as_str().parse::<u32>().ok().filter(|n| *n > 0)?;
        let each = interval_quantity(number(&captures, 2)?, &unit(&captures, 3))?;
        Some(IntervalSet { count, each })
    })
}

/// Parse plan text into warm-up, rest, work and cool-down components
#[must_use]
pub fn parse_plan_text(text: &str) -> ParsedPlanText {
    ParsedPlanText {
        warmup_seconds: first_minutes(text, [&WARMUP_AFTER, &WARMUP_BEFORE]),
        cooldown_seconds: first_minutes(text, [&COOLDOWN_AFTER, &COOLDOWN_BEFORE]),
        rest_seconds: rest_seconds(text),
        intervals: interval_set(text),
    }
}
