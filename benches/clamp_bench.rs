//! Per-frame cost of the bounds clamp and the full constrained step.

#![allow(clippy::expect_used)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::{Vec2, Vec3};
use seabed_view::camera::{Camera, ControlState, MapControls, Projection};
use seabed_view::options::BoundsOptions;
use seabed_view::{BoundsConstraint, Footprint};

fn setup() -> (BoundsConstraint, MapControls, Camera) {
    let footprint = Footprint::from_corners(
        Vec3::new(-50.0, -1.0, -50.0),
        Vec3::new(50.0, 1.0, 50.0),
    );
    let mut camera = Camera {
        eye: Vec3::new(0.0, 36.0, 48.0),
        target: Vec3::ZERO,
        up: Vec3::Y,
        aspect: 16.0 / 9.0,
        fovy: 75.0,
        znear: 0.1,
        zfar: 100.0,
        projection: Projection::Perspective,
    };
    let mut controls = MapControls::new(Vec3::ZERO);
    let bounds = BoundsConstraint::initialize(
        Some(&footprint),
        &mut camera,
        &mut controls,
        &BoundsOptions::default(),
    )
    .expect("reference footprint must initialize");
    (bounds, controls, camera)
}

fn clamp_benchmark(c: &mut Criterion) {
    let (bounds, _, _) = setup();
    c.bench_function("clamp_target_and_eye", |b| {
        b.iter(|| {
            let mut target = black_box(Vec3::new(120.0, 0.0, -80.0));
            let mut eye = black_box(Vec3::new(140.0, 15.0, -60.0));
            bounds.clamp(&mut target, &mut eye);
            black_box((target, eye))
        });
    });
}

fn step_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("constrained_step");

    let (mut bounds, mut controls, mut camera) = setup();
    group.bench_function("idle", |b| {
        b.iter(|| black_box(bounds.step(&mut controls, &mut camera)));
    });

    let (mut bounds, mut controls, mut camera) = setup();
    group.bench_function("panning", |b| {
        b.iter(|| {
            controls.pan(black_box(Vec2::new(12.0, -4.0)), &camera, 900.0);
            black_box(bounds.step(&mut controls, &mut camera))
        });
    });

    let (_, mut controls, mut camera) = setup();
    group.bench_function("bare_update", |b| {
        b.iter(|| black_box(controls.update(&mut camera)));
    });

    group.finish();
}

criterion_group!(benches, clamp_benchmark, step_benchmark);
criterion_main!(benches);
