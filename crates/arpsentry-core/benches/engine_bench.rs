//! # Engine Benchmarks
//!
//! Performance benchmarks for the arpsentry-core hot paths.
//!
//! Run with: `cargo bench -p arpsentry-core`

use arpsentry_core::{LogicEngine, MediaAddr, NetAddr, SystemId, Timestamp};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Build an engine whose store holds `size` binding statements for
/// distinct network addresses plus matching trust statements.
fn create_populated_engine(size: u64) -> LogicEngine {
    let engine = LogicEngine::new();
    for i in 0..size {
        let system = SystemId::new(format!("host{:04}", i % 64));
        engine
            .record_trust(system.clone(), Timestamp::new(i))
            .expect("record");
        engine
            .record_binding(
                system,
                MediaAddr::new(format!("02:00:00:00:{:02x}:{:02x}", i / 256, i % 256)),
                NetAddr::new(format!("10.0.{}.{}", i / 256, i % 256)),
                Timestamp::new(i),
            )
            .expect("record");
    }
    engine
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_record_binding(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_binding");

    for size in [100u64, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let engine = LogicEngine::new();
                for i in 0..size {
                    let _ = engine.record_binding(
                        SystemId::new("sysA"),
                        MediaAddr::new("AA:BB:CC:DD:EE:FF"),
                        NetAddr::new("10.0.0.1"),
                        Timestamp::new(i),
                    );
                }
                black_box(engine)
            });
        });
    }

    group.finish();
}

fn bench_resolve_media(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_media_for_network");

    for size in [100u64, 1000, 10000].iter() {
        let engine = create_populated_engine(*size);
        let net = NetAddr::new("10.0.0.1");
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(engine.resolve_media_for_network(&net, Timestamp::new(u64::MAX))));
        });
    }

    group.finish();
}

fn bench_is_trusted(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_trusted");

    for size in [100u64, 1000, 10000].iter() {
        let engine = create_populated_engine(*size);
        let system = SystemId::new("host0001");
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(engine.is_trusted(&system, Timestamp::new(u64::MAX))));
        });
    }

    group.finish();
}

fn bench_disabled_fast_path(c: &mut Criterion) {
    // The motivation for disable(): queries must become cheap no-ops
    let engine = create_populated_engine(10000);
    engine.disable();
    let net = NetAddr::new("10.0.0.1");
    let system = SystemId::new("host0001");

    c.bench_function("disabled_resolve", |b| {
        b.iter(|| black_box(engine.resolve_media_for_network(&net, Timestamp::new(u64::MAX))));
    });
    c.bench_function("disabled_is_trusted", |b| {
        b.iter(|| black_box(engine.is_trusted(&system, Timestamp::new(u64::MAX))));
    });
}

criterion_group!(
    benches,
    bench_record_binding,
    bench_resolve_media,
    bench_is_trusted,
    bench_disabled_fast_path
);
criterion_main!(benches);
