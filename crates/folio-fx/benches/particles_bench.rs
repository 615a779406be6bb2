//! Benchmarks for the canvas animators.
//!
//! Budgets (one frame at 60 Hz is 16.6 ms; these should be a small slice):
//! - Particle field step + draw, 50 particles: < 50µs
//! - Particle field step + draw, 150 particles: < 400µs (connections are O(n²))
//! - Matrix rain step + draw, 1920px wide: < 50µs
//!
//! Run with: cargo bench -p folio-fx --bench particles_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

use folio_core::geometry::Size;
use folio_core::rng::FxRng;
use folio_fx::effect::{CanvasFx, ContinuousFx, FrameContext};
use folio_fx::matrix_rain::{MatrixConfig, MatrixRain};
use folio_fx::particles::{ParticleConfig, ParticleField};
use folio_fx::surface::RecordingSurface;

const VIEWPORT: Size = Size::new(1920.0, 1080.0);

fn bench_particle_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("particles/frame");

    for count in [50usize, 100, 150] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("step_draw", count), &count, |b, &count| {
            let config = ParticleConfig {
                count,
                ..ParticleConfig::default()
            };
            let mut field = ParticleField::new(config, VIEWPORT, FxRng::from_seed(42));
            let mut surface = RecordingSurface::new(VIEWPORT);
            let ctx = FrameContext::nth(1, Duration::from_millis(16));
            b.iter(|| {
                field.step(&ctx);
                field.draw(&mut surface);
                black_box(surface.take());
            });
        });
    }

    group.finish();
}

fn bench_connections(c: &mut Criterion) {
    let field = ParticleField::new(ParticleConfig::default(), VIEWPORT, FxRng::from_seed(7));
    c.bench_function("particles/connections_50", |b| {
        b.iter(|| black_box(field.connections()));
    });
}

fn bench_matrix_rain(c: &mut Criterion) {
    let mut rain = MatrixRain::new(MatrixConfig::default(), VIEWPORT, FxRng::from_seed(3));
    let mut surface = RecordingSurface::new(VIEWPORT);
    let ctx = FrameContext::nth(1, Duration::from_millis(33));
    c.bench_function("matrix/step_draw_1920", |b| {
        b.iter(|| {
            rain.step(&ctx);
            rain.draw(&mut surface);
            black_box(surface.take());
        });
    });
}

criterion_group!(
    benches,
    bench_particle_field,
    bench_connections,
    bench_matrix_rain
);
criterion_main!(benches);
