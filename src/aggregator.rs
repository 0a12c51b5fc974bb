// ABOUTME: Metric aggregator computing distance, duration, effort and heart rate for one step slice
// ABOUTME: Sport-specific pace/power/swim formulas with explicit absences instead of zeros or guesses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metric Aggregator
//!
//! Turns a [`StepSlice`] into an [`ExecutedInterval`]. Averages use the samples
//! in `(start, end]`; the shared start boundary belongs to the previous slice.
//! Whenever a metric cannot be computed defensibly it is left absent and a
//! [`DataIssue`] records why.

use reconcile_core::constants::pool::SWIM_PACE_UNIT_DISTANCE;
use reconcile_core::constants::units::METERS_PER_MILE;
use reconcile_core::errors::{DataIssue, Metric};
use reconcile_core::models::{
    Adherence, EffortFamily, ExecutedInterval, IntervalEffort, IntervalStatus, PaceBasis,
    PlannedStep, PoolLength, StepBound, StepKind,
};

use crate::config::ReconcileConfig;
use crate::distance::AccumulatedSample;
use crate::segmenter::StepSlice;

/// Per-workout inputs shared by every slice
#[derive(Debug, Clone, Copy)]
pub struct AggregationContext<'a> {
    /// How effort is expressed for this sport
    pub family: EffortFamily,
    /// Inferred pool, used by swim pace
    pub pool: PoolLength,
    /// Thresholds
    pub config: &'a ReconcileConfig,
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

/// Mean heart rate over the slice interior
///
/// Warm-up slices drop the first settle window unless that empties the set.
/// With enough values, readings far from the slice median are rejected as
/// strap artifacts. Returns the mean and whether any value was rejected.
#[must_use]
pub fn average_heart_rate(
    interior: &[AccumulatedSample],
    slice_start_time: f64,
    kind: StepKind,
    config: &ReconcileConfig,
) -> (Option<f64>, bool) {
    let plausible: Vec<(f64, f64)> = interior
        .iter()
        .filter_map(|s| {
            s.sample
                .heart_rate
                .filter(|bpm| config.samples.is_plausible_heart_rate(*bpm))
                .map(|bpm| (s.time(), bpm))
        })
        .collect();

    let mut values: Vec<f64> = if kind == StepKind::Warmup {
        let settle_until = slice_start_time + config.aggregator.warmup_hr_settle_seconds;
        let settled: Vec<f64> = plausible
            .iter()
            .filter(|(time, _)| *time > settle_until)
            .map(|(_, bpm)| *bpm)
            .collect();
        if settled.is_empty() {
            plausible.iter().map(|(_, bpm)| *bpm).collect()
        } else {
            settled
        }
    } else {
        plausible.iter().map(|(_, bpm)| *bpm).collect()
    };

    let mut rejected = false;
    if values.len() >= config.aggregator.hr_outlier_min_samples {
        if let Some(center) = median(&values) {
            let window = center * config.aggregator.hr_outlier_fraction;
            let before = values.len();
            values.retain(|bpm| (bpm - center).abs() <= window);
            rejected = values.len() < before;
        }
    }
    (mean(&values), rejected)
}

/// Distance covered by the slice, `None` when no increment had a distance signal
#[must_use]
pub fn slice_distance(slice: &StepSlice, samples: &[AccumulatedSample]) -> Option<f64> {
    let interior = slice.interior(samples);
    if !interior.iter().any(|s| s.source.is_measured()) {
        return None;
    }
    let start = samples.get(slice.start)?.cumulative_distance;
    let end = samples.get(slice.end)?.cumulative_distance;
    let measured = (end - start).max(0.0);
    Some(match slice.bound {
        StepBound::Distance(target) => measured.min(target),
        StepBound::Duration(_) => measured,
    })
}

/// Run/walk pace with its distance basis, or the issue explaining its absence
fn run_pace(
    step: &PlannedStep,
    slice: &StepSlice,
    distance: Option<f64>,
    duration: f64,
    interior: &[AccumulatedSample],
    config: &ReconcileConfig,
) -> Result<IntervalEffort, DataIssue> {
    let agg = &config.aggregator;
    let plausible_miles = agg.plausible_interval_min_miles..=agg.plausible_interval_max_miles;
    let miles = distance.map(|meters| meters / METERS_PER_MILE);

    if let Some(miles) = miles.filter(|m| plausible_miles.contains(m)) {
        return Ok(IntervalEffort::Pace {
            seconds_per_mile: duration / miles,
            basis: PaceBasis::Measured,
        });
    }

    let implausibly_small = miles.is_none_or(|m| m < agg.plausible_interval_min_miles);
    if step.kind == StepKind::Work && implausibly_small {
        let planned = step.planned_distance().or(match slice.bound {
            StepBound::Distance(meters) => Some(meters),
            StepBound::Duration(_) => None,
        });
        if let Some(planned_miles) = planned.map(|meters| meters / METERS_PER_MILE) {
            return Ok(IntervalEffort::Pace {
                seconds_per_mile: duration / planned_miles,
                basis: PaceBasis::Planned,
            });
        }
    }

    if step.kind == StepKind::Rest {
        return rest_pace(interior, config);
    }

    Err(match miles {
        Some(_) => DataIssue::ImplausibleValue(Metric::Distance),
        None => DataIssue::MissingSignal(Metric::Distance),
    })
}

/// Rest/jog pace from average instantaneous speed, accepted only inside the pace window
fn rest_pace(
    interior: &[AccumulatedSample],
    config: &ReconcileConfig,
) -> Result<IntervalEffort, DataIssue> {
    let agg = &config.aggregator;
    let speeds: Vec<f64> = interior
        .iter()
        .filter_map(|s| s.sample.instant_speed)
        .filter(|speed| config.samples.is_moving_speed(*speed))
        .collect();
    let speed = mean(&speeds).ok_or(DataIssue::MissingSignal(Metric::Speed))?;
    if speed >= agg.rest_max_speed_mps {
        return Err(DataIssue::ImplausibleValue(Metric::Speed));
    }
    let seconds_per_mile = METERS_PER_MILE / speed;
    let window = agg.rest_pace_fastest_seconds_per_mile..=agg.rest_pace_slowest_seconds_per_mile;
    if !window.contains(&seconds_per_mile) {
        return Err(DataIssue::ImplausibleValue(Metric::Pace));
    }
    Ok(IntervalEffort::Pace {
        seconds_per_mile,
        basis: PaceBasis::SpeedDerived,
    })
}

/// Ride effort: average power, else average speed; never power from speed
fn ride_effort(
    distance: Option<f64>,
    duration: f64,
    interior: &[AccumulatedSample],
    config: &ReconcileConfig,
) -> Result<IntervalEffort, DataIssue> {
    let powers: Vec<f64> = interior.iter().filter_map(|s| s.sample.power).collect();
    if let Some(watts) = mean(&powers) {
        return Ok(IntervalEffort::Power { watts });
    }
    // Coasting and stopped samples below the stationary threshold are noise
    let speeds: Vec<f64> = interior
        .iter()
        .filter_map(|s| s.sample.instant_speed)
        .filter(|speed| config.samples.is_moving_speed(*speed))
        .collect();
    mean(&speeds)
        .or_else(|| distance.filter(|_| duration > 0.0).map(|d| d / duration))
        .filter(|speed| config.samples.is_moving_speed(*speed))
        .map(|meters_per_second| IntervalEffort::Speed { meters_per_second })
        .ok_or(DataIssue::MissingSignal(Metric::Speed))
}

/// Swim pace per 100 pool units; an unknown pool unit yields no pace
fn swim_pace(
    distance: Option<f64>,
    duration: f64,
    pool: PoolLength,
) -> Result<IntervalEffort, DataIssue> {
    let meters_per_unit = pool
        .unit
        .meters_per_unit()
        .ok_or(DataIssue::MissingSignal(Metric::PoolLength))?;
    let meters = distance
        .filter(|d| *d > 0.0)
        .ok_or(DataIssue::MissingSignal(Metric::Distance))?;
    let hundreds = meters / meters_per_unit / SWIM_PACE_UNIT_DISTANCE;
    Ok(IntervalEffort::SwimPace {
        seconds_per_hundred: duration / hundreds,
        unit: pool.unit,
    })
}

/// Compare effort with the step's pace or power target
#[must_use]
pub fn adherence(
    step: &PlannedStep,
    effort: &IntervalEffort,
    config: &ReconcileConfig,
) -> Option<Adherence> {
    let classify = |value: f64, low: f64, high: f64, higher_is_harder: bool| {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        if value < low {
            Some(if higher_is_harder {
                Adherence::TooEasy
            } else {
                Adherence::TooHard
            })
        } else if value > high {
            Some(if higher_is_harder {
                Adherence::TooHard
            } else {
                Adherence::TooEasy
            })
        } else {
            Some(Adherence::OnTarget)
        }
    };

    match *effort {
        IntervalEffort::Pace {
            seconds_per_mile, ..
        } => {
            if let Some(range) = step.target_pace_range {
                return classify(
                    seconds_per_mile,
                    range.fast_seconds_per_mile,
                    range.slow_seconds_per_mile,
                    false,
                );
            }
            let target = step.target_pace_seconds_per_mile?;
            let tolerance = config.aggregator.pace_tolerance_seconds_per_mile;
            classify(seconds_per_mile, target - tolerance, target + tolerance, false)
        }
        IntervalEffort::Power { watts } => {
            if let Some(range) = step.target_power_range {
                return classify(watts, range.low_watts, range.high_watts, true);
            }
            let target = step.target_power_watts?;
            let tolerance = target * config.aggregator.power_tolerance_fraction;
            classify(watts, target - tolerance, target + tolerance, true)
        }
        IntervalEffort::SwimPace { .. } | IntervalEffort::Speed { .. } => None,
    }
}

/// Aggregate one matched slice into an executed interval
#[must_use]
pub fn aggregate(
    step_index: usize,
    step: &PlannedStep,
    slice: &StepSlice,
    samples: &[AccumulatedSample],
    ctx: &AggregationContext<'_>,
) -> ExecutedInterval {
    let mut interval = ExecutedInterval::empty(step_index, step, IntervalStatus::Measured);
    let interior = slice.interior(samples);
    let start_time = samples.get(slice.start).map_or(0.0, AccumulatedSample::time);

    let duration = Some(slice.reported_duration).filter(|d| d.is_finite() && *d > 0.0);
    interval.duration_seconds = duration;
    if duration.is_none() {
        interval.note(DataIssue::MissingSignal(Metric::Duration));
    }

    let distance = slice_distance(slice, samples);
    interval.distance_meters = distance;
    if distance.is_none() {
        interval.note(DataIssue::MissingSignal(Metric::Distance));
    }

    let (avg_heart_rate, rejected) =
        average_heart_rate(interior, start_time, step.kind, ctx.config);
    interval.avg_heart_rate = avg_heart_rate;
    if avg_heart_rate.is_none() {
        interval.note(DataIssue::MissingSignal(Metric::HeartRate));
    }
    if rejected {
        interval.note(DataIssue::ImplausibleValue(Metric::HeartRate));
    }

    let effort = match duration {
        None => Err(DataIssue::MissingSignal(Metric::Duration)),
        Some(duration) => match ctx.family {
            EffortFamily::RunPace => run_pace(step, slice, distance, duration, interior, ctx.config),
            EffortFamily::RidePower => {
                ride_effort(distance, duration, interior, ctx.config)
            }
            EffortFamily::SwimPace => swim_pace(distance, duration, ctx.pool),
        },
    };
    match effort {
        Ok(effort) => {
            interval.adherence = adherence(step, &effort, ctx.config);
            interval.effort = Some(effort);
        }
        Err(issue) => interval.note(issue),
    }

    interval
}
