// ABOUTME: Step segmenter carving accumulated samples into one contiguous slice per planned step
// ABOUTME: Threads an explicit monotonic Cursor through distance- or duration-bounded steps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Step Segmenter
//!
//! A single [`Cursor`] walks the sample sequence once across the whole step
//! list. Each step consumes samples from the cursor up to the first sample that
//! satisfies its bound, and the cursor moves to that sample. Slices share their
//! boundary sample: slice *i* spans `[start, end]` and slice *i+1* starts at
//! `end`. The cursor never moves backward, so steps cannot overlap.

use reconcile_core::models::{PlannedStep, StepBound, StepKind};
use serde::Serialize;
use tracing::debug;

use crate::config::SegmenterConfig;
use crate::distance::AccumulatedSample;

/// Segmenter position: sample index plus the time and distance at that index
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cursor {
    /// Index into the accumulated sample sequence
    pub sample_index: usize,
    /// Seconds since activity start at `sample_index`
    pub time: f64,
    /// Cumulative meters at `sample_index`
    pub distance: f64,
}

impl Cursor {
    /// Cursor positioned at `index`
    #[must_use]
    pub fn at(samples: &[AccumulatedSample], index: usize) -> Self {
        samples.get(index).map_or(
            Self {
                sample_index: index,
                time: 0.0,
                distance: 0.0,
            },
            |sample| Self {
                sample_index: index,
                time: sample.time(),
                distance: sample.cumulative_distance,
            },
        )
    }
}

/// Where a step's bound came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundOrigin {
    /// The step's own distance or duration target
    Step,
    /// The workout-level typical interval distance
    TypicalDistance,
}

/// Sample range matched to one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepSlice {
    /// First sample (shared with the previous slice)
    pub start: usize,
    /// Last sample (shared with the next slice)
    pub end: usize,
    /// Bound used to find `end`
    pub bound: StepBound,
    /// Where the bound came from
    pub origin: BoundOrigin,
    /// Elapsed seconds between `start` and `end`
    pub measured_duration: f64,
    /// Duration to report; the planned one when the measured one is implausibly short
    pub reported_duration: f64,
    /// Whether `reported_duration` was taken from the plan
    pub duration_from_plan: bool,
}

impl StepSlice {
    /// Samples strictly after the shared start boundary, up to and including `end`
    #[must_use]
    pub fn interior<'a>(&self, samples: &'a [AccumulatedSample]) -> &'a [AccumulatedSample] {
        samples.get(self.start + 1..=self.end).unwrap_or(&[])
    }

    /// Samples `[start, end]`
    #[must_use]
    pub fn span<'a>(&self, samples: &'a [AccumulatedSample]) -> &'a [AccumulatedSample] {
        samples.get(self.start..=self.end).unwrap_or(&[])
    }
}

/// Segmentation result for one planned step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepSegment {
    /// A slice was matched
    Matched(StepSlice),
    /// No distance, duration or fallback bound; the cursor did not move
    Unresolvable,
    /// Resolvable, but the cursor had already reached the end of the stream
    BeyondTelemetry,
}

/// Result of segmenting a whole workout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segmentation {
    /// One entry per planned step, in step order
    pub segments: Vec<StepSegment>,
    /// First sample kept after the leading idle trim
    pub first_active_index: usize,
    /// Cursor after the last step
    pub final_cursor: Cursor,
}

impl Segmentation {
    /// Whether any step produced a slice
    #[must_use]
    pub fn has_matches(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, StepSegment::Matched(_)))
    }
}

/// Bound for a step: its own distance, then its duration, then the typical
/// interval distance for work or unspecified steps
#[must_use]
pub fn resolve_bound(
    step: &PlannedStep,
    typical_distance: Option<f64>,
) -> Option<(StepBound, BoundOrigin)> {
    if let Some(bound) = step.bound() {
        return Some((bound, BoundOrigin::Step));
    }
    typical_distance
        .filter(|meters| meters.is_finite() && *meters > 0.0 && step.kind.accepts_typical_distance())
        .map(|meters| (StepBound::Distance(meters), BoundOrigin::TypicalDistance))
}

/// Index of the first sample after the leading GPS-lock idle period
///
/// Leading pairs are skipped while the gap between consecutive samples is
/// short and the distance covered across it is negligible.
#[must_use]
pub fn trim_leading_idle(samples: &[AccumulatedSample], config: &SegmenterConfig) -> usize {
    let mut index = 0;
    while let (Some(prev), Some(curr)) = (samples.get(index), samples.get(index + 1)) {
        let dt = curr.time() - prev.time();
        let moved = curr.cumulative_distance - prev.cumulative_distance;
        if dt <= 0.0
            || dt > config.idle_trim_max_gap_seconds
            || moved > config.idle_trim_max_drift_meters
        {
            break;
        }
        index += 1;
    }

    // The last sample stays available to the first step
    match samples.len().checked_sub(1) {
        Some(last) if index < last => index,
        _ => 0,
    }
}

/// First index after `from` whose value reaches `target`, else the last index
fn first_reaching(
    samples: &[AccumulatedSample],
    from: usize,
    target: f64,
    value: impl Fn(&AccumulatedSample) -> f64,
) -> usize {
    let Some(last) = samples.len().checked_sub(1) else {
        return from;
    };
    (from + 1..=last)
        .find(|&index| value(&samples[index]) >= target - f64::EPSILON * target.abs().max(1.0))
        .unwrap_or(last)
}

/// Carve one step starting at `cursor`, returning the slice and the advanced cursor
#[must_use]
pub fn advance(
    cursor: Cursor,
    step: &PlannedStep,
    bound: StepBound,
    origin: BoundOrigin,
    samples: &[AccumulatedSample],
    config: &SegmenterConfig,
) -> (StepSlice, Cursor) {
    let last_time = samples.last().map_or(cursor.time, AccumulatedSample::time);
    let end = match bound {
        StepBound::Distance(meters) => {
            let target = cursor.distance + meters;
            first_reaching(samples, cursor.sample_index, target, |s| s.cumulative_distance)
        }
        StepBound::Duration(seconds) => {
            let seconds = if step.kind == StepKind::Warmup {
                seconds.min(last_time - cursor.time)
            } else {
                seconds
            };
            let target = cursor.time + seconds;
            first_reaching(samples, cursor.sample_index, target, AccumulatedSample::time)
        }
    };

    // An empty stream leaves the cursor where it was
    let next = if end == cursor.sample_index {
        cursor
    } else {
        Cursor::at(samples, end)
    };
    let measured_duration = next.time - cursor.time;
    let planned_duration = step.planned_duration();
    let (reported_duration, duration_from_plan) = match planned_duration {
        Some(planned) if measured_duration < config.min_reportable_duration_seconds => {
            (planned, true)
        }
        _ => (measured_duration, false),
    };

    let slice = StepSlice {
        start: cursor.sample_index,
        end,
        bound,
        origin,
        measured_duration,
        reported_duration,
        duration_from_plan,
    };
    (slice, next)
}

/// Segment the accumulated samples across the planned steps
#[must_use]
pub fn segment(
    samples: &[AccumulatedSample],
    steps: &[PlannedStep],
    typical_distance: Option<f64>,
    config: &SegmenterConfig,
) -> Segmentation {
    if samples.is_empty() {
        let segments = steps
            .iter()
            .map(|step| match resolve_bound(step, typical_distance) {
                Some(_) => StepSegment::BeyondTelemetry,
                None => StepSegment::Unresolvable,
            })
            .collect();
        return Segmentation {
            segments,
            first_active_index: 0,
            final_cursor: Cursor::at(samples, 0),
        };
    }

    let first_active_index = trim_leading_idle(samples, config);
    if first_active_index > 0 {
        debug!(
            skipped = first_active_index,
            seconds = samples[first_active_index].time() - samples[0].time(),
            "trimmed leading idle samples"
        );
    }

    let last = samples.len() - 1;
    let mut cursor = Cursor::at(samples, first_active_index);
    let mut segments = Vec::with_capacity(steps.len());
    for step in steps {
        let Some((bound, origin)) = resolve_bound(step, typical_distance) else {
            segments.push(StepSegment::Unresolvable);
            continue;
        };
        if cursor.sample_index >= last {
            segments.push(StepSegment::BeyondTelemetry);
            continue;
        }
        let (slice, next) = advance(cursor, step, bound, origin, samples, config);
        cursor = next;
        segments.push(StepSegment::Matched(slice));
    }

    debug!(
        steps = steps.len(),
        matched = segments
            .iter()
            .filter(|s| matches!(s, StepSegment::Matched(_)))
            .count(),
        cursor_time = cursor.time,
        cursor_distance = cursor.distance,
        "segmented workout"
    );

    Segmentation {
        segments,
        first_active_index,
        final_cursor: cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceSource;
    use reconcile_core::models::Sample;

    fn track(points: &[(f64, f64)]) -> Vec<AccumulatedSample> {
        points
            .iter()
            .map(|&(time, distance)| AccumulatedSample {
                sample: Sample::at(time),
                cumulative_distance: distance,
                source: DistanceSource::Provider,
            })
            .collect()
    }

    #[test]
    fn test_distance_step_stops_at_first_sample_reaching_target() {
        let samples = track(&[(0.0, 0.0), (10.0, 40.0), (20.0, 80.0), (30.0, 120.0)]);
        let step = PlannedStep::distance(StepKind::Work, 70.0);
        let (slice, cursor) = advance(
            Cursor::at(&samples, 0),
            &step,
            StepBound::Distance(70.0),
            BoundOrigin::Step,
            &samples,
            &SegmenterConfig::default(),
        );
        assert_eq!((slice.start, slice.end), (0, 2));
        assert_eq!(cursor.distance, 80.0);
    }

    #[test]
    fn test_unresolvable_step_does_not_move_cursor() {
        let samples = track(&[(0.0, 0.0), (10.0, 40.0), (20.0, 80.0)]);
        let steps = vec![
            PlannedStep::default(),
            PlannedStep::duration(StepKind::Work, 10.0),
        ];
        let seg = segment(&samples, &steps, None, &SegmenterConfig::default());
        assert_eq!(seg.segments[0], StepSegment::Unresolvable);
        assert!(matches!(
            seg.segments[1],
            StepSegment::Matched(StepSlice { start: 0, end: 1, .. })
        ));
    }

    #[test]
    fn test_typical_distance_not_used_for_rest() {
        let rest = PlannedStep {
            kind: StepKind::Rest,
            ..PlannedStep::default()
        };
        assert_eq!(resolve_bound(&rest, Some(400.0)), None);
        let work = PlannedStep {
            kind: StepKind::Work,
            ..PlannedStep::default()
        };
        assert_eq!(
            resolve_bound(&work, Some(400.0)),
            Some((StepBound::Distance(400.0), BoundOrigin::TypicalDistance))
        );
    }

    #[test]
    fn test_short_slice_reports_planned_duration() {
        let samples = track(&[(0.0, 0.0), (2.0, 10.0)]);
        let step = PlannedStep::duration(StepKind::Work, 30.0);
        let (slice, _) = advance(
            Cursor::at(&samples, 0),
            &step,
            StepBound::Duration(30.0),
            BoundOrigin::Step,
            &samples,
            &SegmenterConfig::default(),
        );
        assert!(slice.duration_from_plan);
        assert_eq!(slice.reported_duration, 30.0);
        assert_eq!(slice.measured_duration, 2.0);
    }

    #[test]
    fn test_advance_over_empty_stream_keeps_cursor() {
        let cursor = Cursor {
            sample_index: 0,
            time: 12.0,
            distance: 30.0,
        };
        let step = PlannedStep::duration(StepKind::Work, 30.0);
        let (slice, next) = advance(
            cursor,
            &step,
            StepBound::Duration(30.0),
            BoundOrigin::Step,
            &[],
            &SegmenterConfig::default(),
        );
        assert_eq!(next, cursor);
        assert_eq!((slice.start, slice.end), (0, 0));
        assert_eq!(slice.measured_duration, 0.0);
        assert!(slice.duration_from_plan);
        assert_eq!(slice.reported_duration, 30.0);
    }
}
