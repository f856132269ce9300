// Benchmarks for the edit engine
//
// Workloads:
// - typing: sequential single-byte overwrites (hex editor data entry)
// - drain: committing a long typed run with pop_first_change
// - scattered: random overlapping writes across a large file
// - project: applying pending edits onto a screen-sized view
// - undo: writing then undoing a full history

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use patchwork::{EditEngine, Limit};

// =============================================================================
// Benchmark Helpers
// =============================================================================

/// Overwrite `count` consecutive bytes one at a time.
fn typing(engine: &mut EditEngine<u8>, count: u64) {
    for pos in 0..count {
        engine.change_bytes(pos, &[pos as u8], &[0]).unwrap();
    }
}

/// Apply `count` random writes of 1-32 bytes within `space` positions.
fn scattered(engine: &mut EditEngine<u8>, count: usize, space: u64, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..count {
        let pos = rng.gen_range(0..space);
        let len = rng.gen_range(1..=32);
        let data: Vec<u8> = (0..len).map(|_| rng.r#gen()).collect();
        let old = vec![0u8; len];
        engine.change_bytes(pos, &data, &old).unwrap();
    }
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");
    for count in [100u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut engine = EditEngine::default();
                typing(&mut engine, count);
                black_box(engine.change_count())
            });
        });
    }
    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");
    for count in [1_000u64, 10_000, 40_000] {
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || {
                    let mut engine = EditEngine::with_edit_stack_limit(0);
                    typing(&mut engine, count);
                    engine
                },
                |mut engine| {
                    let mut runs = 0usize;
                    while engine.pop_first_change().is_some() {
                        runs += 1;
                    }
                    black_box(runs)
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_scattered(c: &mut Criterion) {
    let mut group = c.benchmark_group("scattered");
    for count in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut engine = EditEngine::default();
                scattered(&mut engine, count, 1 << 20, 42);
                black_box(engine.change_count())
            });
        });
    }
    group.finish();
}

fn bench_project(c: &mut Criterion) {
    let mut engine = EditEngine::default();
    scattered(&mut engine, 10_000, 1 << 16, 7);

    let mut group = c.benchmark_group("project");
    for size in [256usize, 4096] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut view = vec![0u8; size];
            b.iter(|| {
                engine.apply_changes(&mut view, 1 << 15, Limit::Unbounded);
                black_box(view[0])
            });
        });
    }
    group.finish();
}

fn bench_undo(c: &mut Criterion) {
    c.bench_function("undo_full_history", |b| {
        b.iter(|| {
            let mut engine = EditEngine::with_edit_stack_limit(1_000);
            scattered(&mut engine, 1_000, 1 << 12, 3);
            while engine.undo().is_some() {}
            black_box(engine.has_changes())
        });
    });
}

criterion_group!(
    benches,
    bench_typing,
    bench_drain,
    bench_scattered,
    bench_project,
    bench_undo,
);
criterion_main!(benches);
