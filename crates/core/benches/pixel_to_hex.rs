use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexgrid::{BoundedGrid, CoordinateEngine, Orientation, Rect2D};
use std::sync::Arc;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixel-to-hex");

    for &orientation in &[Orientation::Horizontal, Orientation::Vertical] {
        let engine = CoordinateEngine::new(32.0, 24.0, orientation).unwrap();
        let snapshot = engine.snapshot();
        group.bench_function(format!("{} sweep", orientation), |b| {
            b.iter(|| {
                // Walk a diagonal so we hit both the straight and slanted
                // parts of the cells
                for i in 0..1000 {
                    let p = i as f32 * 1.37;
                    black_box(snapshot.pixel_to_hex(black_box(p), black_box(p)));
                }
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("visibility");
    let engine =
        CoordinateEngine::new(32.0, 16.0, Orientation::Horizontal).unwrap();
    engine.bind_model(Arc::new(BoundedGrid::new(1000, 1000)));
    let viewport = Rect2D::new(1234.0, 567.0, 1920.0, 1080.0);
    group.bench_function("enumerate fast", |b| {
        b.iter(|| engine.enumerate_visible(black_box(viewport), false).count())
    });
    group.bench_function("enumerate accurate", |b| {
        b.iter(|| engine.enumerate_visible(black_box(viewport), true).count())
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
