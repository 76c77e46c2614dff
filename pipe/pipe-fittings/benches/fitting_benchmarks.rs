//! Benchmarks for fitting generation.
//!
//! Run with: cargo bench -p pipe-fittings
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p pipe-fittings -- --save-baseline main
//! 2. After changes: cargo bench -p pipe-fittings -- --baseline main

#![allow(missing_docs, clippy::unwrap_used, clippy::cast_possible_truncation)]

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use pipe_fittings::{
    EndpointType, FittingConfig, FittingKind, FittingParams, FittingRequest, build_all, elbow,
    six_way, tee,
};
use pipe_spec::{Schedule, SpecQuery, specs_for};

// =============================================================================
// Request Generation
// =============================================================================

/// One tee request per size of a schedule.
fn tee_requests(schedule: Schedule) -> Vec<FittingRequest> {
    specs_for(schedule)
        .map(|spec| {
            FittingRequest::new(
                FittingKind::Tee,
                SpecQuery::for_schedule(schedule).dn(spec.dn()),
            )
            .with_end(Some("mipt"))
            .with_end(Some("socket"))
            .with_end(Some("fipt"))
        })
        .collect()
}

fn bench_assemblers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Assemblers");
    let spec = SpecQuery::new(40).dn("DN50").find().unwrap();
    let params = FittingParams::default();
    let config = FittingConfig::default();
    let threaded = [
        Some(EndpointType::MaleThread),
        Some(EndpointType::FemaleThread),
        Some(EndpointType::Socket),
    ];

    group.bench_function("tee_threaded", |b| {
        b.iter(|| tee(black_box(&spec), &threaded, &params, &config));
    });

    let swept = params.clone().with_bend_radius(80.0);
    group.bench_function("elbow_swept", |b| {
        b.iter(|| elbow(black_box(&spec), &[], &swept, &config));
    });

    group.bench_function("six_way", |b| {
        b.iter(|| six_way(black_box(&spec), &[], &params, &config));
    });

    group.finish();
}

fn bench_outputs(c: &mut Criterion) {
    let mut group = c.benchmark_group("Outputs");
    let spec = SpecQuery::new(40).dn("DN50").find().unwrap();
    let config = FittingConfig::default();
    let model = six_way(
        &spec,
        &[Some(EndpointType::FemaleThread); 6],
        &FittingParams::default(),
        &config,
    )
    .unwrap();

    group.throughput(Throughput::Elements(model.solid().primitive_count() as u64));

    group.bench_function("bounds_six_way", |b| {
        b.iter(|| black_box(&model).bounds());
    });

    group.bench_function("scad_six_way", |b| {
        b.iter(|| black_box(&model).to_scad(&config));
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch");
    group.sample_size(20);

    let requests = tee_requests(Schedule::Sch40);
    let config = FittingConfig::preview();
    group.throughput(Throughput::Elements(requests.len() as u64));

    group.bench_function("build_all_sch40_tees", |b| {
        b.iter(|| build_all(black_box(&requests), &config));
    });

    group.bench_function("sequential_sch40_tees", |b| {
        b.iter(|| {
            black_box(&requests)
                .iter()
                .map(|r| r.build(&config))
                .collect::<Vec<_>>()
        });
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_assemblers, bench_outputs, bench_batch);
criterion_main!(benches);
