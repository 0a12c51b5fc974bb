// ABOUTME: Criterion benchmarks for the reconciliation pipeline
// ABOUTME: Measures normalization, accumulation and full single/batch reconciliation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the reconciliation pipeline.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

mod common;

use common::fixtures::{interval_plan, run_workout, swim_workout, token_plan, SessionSize};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use workout_reconcile::config::ReconcileConfig;
use workout_reconcile::distance::accumulate;
use workout_reconcile::engine::ReconciliationEngine;
use workout_reconcile::models::{CompletedWorkout, PlannedStep, PlannedWorkout, StepKind};
use workout_reconcile::telemetry::normalize;

fn bench_normalize(c: &mut Criterion) {
    let config = ReconcileConfig::default();
    let mut group = c.benchmark_group("normalize");
    for size in [SessionSize::Short, SessionSize::Long] {
        let workout = run_workout(size);
        group.throughput(Throughput::Elements(size.seconds() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size.label()), &workout, |b, w| {
            b.iter(|| normalize(black_box(w), &config.samples));
        });
    }
    group.finish();
}

fn bench_accumulate(c: &mut Criterion) {
    let config = ReconcileConfig::default();
    let mut group = c.benchmark_group("accumulate");
    for size in [SessionSize::Short, SessionSize::Long] {
        let Ok(samples) = normalize(&run_workout(size), &config.samples) else {
            continue;
        };
        group.throughput(Throughput::Elements(samples.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size.label()), &samples, |b, s| {
            b.iter(|| accumulate(black_box(s), &config.samples, &config.accumulator));
        });
    }
    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let engine = ReconciliationEngine::new(ReconcileConfig::default());
    let workout = run_workout(SessionSize::Short);
    let swim = swim_workout(80);
    let swim_plan = PlannedWorkout::from_steps(
        (0..10)
            .map(|_| PlannedStep::distance(StepKind::Work, 182.88))
            .collect(),
    );

    let mut group = c.benchmark_group("reconcile");
    group.bench_function("structured_run", |b| {
        b.iter(|| engine.reconcile(black_box(&interval_plan()), black_box(&workout)));
    });
    group.bench_function("token_run", |b| {
        b.iter(|| engine.reconcile(black_box(&token_plan()), black_box(&workout)));
    });
    group.bench_function("swim_lengths", |b| {
        b.iter(|| engine.reconcile(black_box(&swim_plan), black_box(&swim)));
    });
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let engine = ReconciliationEngine::new(ReconcileConfig::default());
    let mut group = c.benchmark_group("reconcile_batch");
    for count in [8_usize, 32] {
        let pairs: Vec<(PlannedWorkout, CompletedWorkout)> = (0..count)
            .map(|_| (interval_plan(), run_workout(SessionSize::Short)))
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &pairs, |b, p| {
            b.iter(|| engine.reconcile_batch(black_box(p)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_accumulate,
    bench_reconcile,
    bench_batch,
);
criterion_main!(benches);
