//! Criterion benchmarks for per-frame work.
//!
//! Run with:
//!   cargo bench -p numlab
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use numlab::field::{sample_landscape, Anchor, SampleRange};
use numlab::metrics::snapshot;
use numlab::motion::{Entity, VelocitySegment};
use numlab::scenario::{builtin_catalog, ParamRange, ScenarioKind, SimulationConfig};

fn many_anchors(n: usize) -> Vec<Anchor> {
    (0..n)
        .map(|i| Anchor::new(&format!("a{i}"), "", (i as f64 * 7.3) % 40.0 - 20.0))
        .collect()
}

/// Landscape sampling at the display resolution, with growing anchor counts.
fn bench_landscape(c: &mut Criterion) {
    let mut group = c.benchmark_group("landscape");
    let range = SampleRange::default();

    for n in [3usize, 16, 64, 256].iter() {
        let anchors = many_anchors(*n);
        group.throughput(Throughput::Elements(range.count() as u64));
        group.bench_with_input(BenchmarkId::new("sample", n), n, |b, _| {
            b.iter(|| black_box(sample_landscape(black_box(&anchors), &range)))
        });
    }

    group.finish();
}

/// One snapshot per built-in scenario, as a frame would request it.
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for cfg in builtin_catalog() {
        group.bench_function(cfg.id.clone(), |b| {
            b.iter(|| black_box(snapshot(black_box(&cfg), black_box(3.7))))
        });
    }

    // Piecewise entities with many segments stress the integration loop.
    let entities: Vec<Entity> = (0..8)
        .map(|i| {
            let segments = (0..64)
                .map(|k| VelocitySegment::new(k as f64 * 0.25, ((k + i) % 5) as f64 - 2.0))
                .collect();
            Entity::piecewise(&format!("e{i}"), "", i as f64, segments)
        })
        .collect();
    let lab = SimulationConfig {
        id: "bench_lab".to_string(),
        title: String::new(),
        topic: String::new(),
        description: String::new(),
        kind: ScenarioKind::MotionLab { entities },
        range: ParamRange::new(0.0, 20.0),
        initial: 0.0,
        ceiling: 20.0,
        known_solutions: Vec::new(),
        speed: Default::default(),
    };
    group.bench_function("piecewise_8x64", |b| {
        b.iter(|| black_box(snapshot(black_box(&lab), black_box(15.9))))
    });

    group.finish();
}

criterion_group!(benches, bench_landscape, bench_snapshot);
criterion_main!(benches);
