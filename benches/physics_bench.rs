//! Benchmarks for platform-physics
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use platform_physics::{
    shape_vs_shape, Corner, Material, PlatformMotion, Shape, V2f, World, WorldConfig,
};

const DT: f32 = 1.0 / 60.0;

/// A floor, a slope, a moving platform and `count` falling boxes.
fn build_scene(count: usize) -> World {
    let mut world = World::new(WorldConfig::default()).unwrap();
    world
        .add_platform(Shape::rect(100.0, 1.0), V2f::new(0.0, 20.0))
        .unwrap();
    world
        .add_platform(
            Shape::triangle(V2f::new(5.0, 5.0), Corner::UpLeft, false),
            V2f::new(-20.0, 14.0),
        )
        .unwrap();
    let lift = world
        .add_platform(Shape::rect(4.0, 0.5), V2f::new(30.0, 10.0))
        .unwrap();
    world
        .body_mut(lift)
        .unwrap()
        .set_platform_motion(PlatformMotion::ping_pong(V2f::new(0.0, -5.0), 2.0, 0.5));

    for i in 0..count {
        let x = -40.0 + (i % 40) as f32 * 2.0;
        let y = -(i / 40) as f32 * 2.5;
        world
            .add_body(Shape::square(1.5), V2f::new(x, y), Material::Wood)
            .unwrap();
    }
    world
}

// ============================================================================
// World step benchmarks
// ============================================================================

fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");

    group.bench_function("ten_bodies_60_steps", |b| {
        b.iter(|| {
            let mut world = build_scene(10);
            for _ in 0..60 {
                world.step(black_box(DT));
            }
            world.bodies()[3].pos
        });
    });

    group.bench_function("hundred_bodies_60_steps", |b| {
        b.iter(|| {
            let mut world = build_scene(100);
            for _ in 0..60 {
                world.step(black_box(DT));
            }
            world.bodies()[3].pos
        });
    });

    group.bench_function("hundred_bodies_settled_step", |b| {
        let mut world = build_scene(100);
        for _ in 0..240 {
            world.step(DT);
        }
        b.iter(|| world.step(black_box(DT)));
    });

    group.finish();
}

// ============================================================================
// Narrow phase benchmarks
// ============================================================================

fn bench_narrow_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrow_phase");

    let rect = Shape::rect(1.0, 1.0);
    let circle = Shape::circle(1.0);
    let slope = Shape::triangle(V2f::new(2.0, 1.0), Corner::UpRight, false);

    group.bench_function("rect_vs_rect", |bench| {
        bench.iter(|| {
            shape_vs_shape(
                black_box(V2f::ZERO),
                &rect,
                black_box(V2f::new(1.5, 0.5)),
                &rect,
            )
        });
    });

    group.bench_function("circle_vs_circle", |bench| {
        bench.iter(|| {
            shape_vs_shape(
                black_box(V2f::ZERO),
                &circle,
                black_box(V2f::new(1.5, 0.5)),
                &circle,
            )
        });
    });

    group.bench_function("rect_vs_tri", |bench| {
        bench.iter(|| {
            shape_vs_shape(
                black_box(V2f::new(0.5, -0.9)),
                &rect,
                black_box(V2f::ZERO),
                &slope,
            )
        });
    });

    group.bench_function("circle_vs_tri", |bench| {
        bench.iter(|| {
            shape_vs_shape(
                black_box(V2f::new(0.5, -0.9)),
                &circle,
                black_box(V2f::ZERO),
                &slope,
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_world_step, bench_narrow_phase);
criterion_main!(benches);
