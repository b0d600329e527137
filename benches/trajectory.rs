use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Vector3;

use fieldviz::physics::{
    dipole_field_at, particle_trajectory, FieldLineTracer, TraceDirection,
};
use fieldviz::MU0_OVER_4PI;

fn bench_particle_trajectory(c: &mut Criterion) {
    let m = (2.0 / MU0_OVER_4PI) * Vector3::new(-0.225, 0.0, 0.974);
    let field = move |p: Vector3<f64>| dipole_field_at(m, p);

    c.bench_function("particle_trajectory_10k", |b| {
        b.iter(|| {
            particle_trajectory(
                black_box(Vector3::new(25.0, 5.0, -25.0)),
                black_box(Vector3::new(-0.4, 0.0, 0.4)),
                2e2,
                10_000,
                field,
            )
        })
    });
}

fn bench_field_line(c: &mut Criterion) {
    let m = (2.0 / MU0_OVER_4PI) * Vector3::new(0.0, 0.0, 1.0);
    let field = move |p: Vector3<f64>| dipole_field_at(m, p);
    let tracer = FieldLineTracer::new(0.1, 400.0, 20.0);

    c.bench_function("field_line_trace_both", |b| {
        b.iter(|| {
            tracer.trace(
                black_box(Vector3::new(12.0, 0.0, 3.0)),
                &field,
                TraceDirection::Both,
            )
        })
    });
}

criterion_group!(benches, bench_particle_trajectory, bench_field_line);
criterion_main!(benches);
