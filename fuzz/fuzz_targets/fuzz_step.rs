#![no_main]
use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use platform_physics::{Corner, Material, Shape, V2f, World, WorldConfig};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Platforms: (kind, x, y) in tenths of a unit
    platforms: Vec<(u8, i16, i16)>,
    /// Dynamic bodies: (kind, material, x, y)
    bodies: Vec<(u8, u8, i16, i16)>,
    /// Per-step horizontal input
    pushes: Vec<i8>,
    /// Number of simulation steps (capped)
    step_count: u8,
}

fn material(m: u8) -> Material {
    match m % 6 {
        0 => Material::Rock,
        1 => Material::Wood,
        2 => Material::Metal,
        3 => Material::BouncyBall,
        4 => Material::SuperBall,
        _ => Material::Pillow,
    }
}

fn shape(kind: u8) -> Shape {
    match kind % 4 {
        0 => Shape::circle(0.5),
        1 => Shape::rect(1.0, 0.5),
        2 => Shape::triangle(V2f::new(1.0, 1.0), Corner::UpLeft, false),
        _ => Shape::triangle(V2f::new(2.0, 1.0), Corner::UpRight, true),
    }
}

// Build a random scene and step it. Must never panic, and positions must stay
// finite regardless of input.
fuzz_target!(|input: FuzzInput| {
    let mut world = World::new(WorldConfig::default()).unwrap();

    for &(kind, x, y) in input.platforms.iter().take(8) {
        let pos = V2f::new(x as f32, y as f32) * 0.1;
        let _ = world.add_platform(shape(kind), pos);
    }
    for &(kind, m, x, y) in input.bodies.iter().take(16) {
        let pos = V2f::new(x as f32, y as f32) * 0.1;
        let _ = world.add_body(shape(kind), pos, material(m));
    }

    let steps = (input.step_count as usize).min(64);
    for i in 0..steps {
        let player = world.len().checked_sub(1);
        if let (Some(&push), Some(player)) = (input.pushes.get(i), player) {
            if let Some(body) = world.body_mut(player) {
                body.push(V2f::new(push as f32, 0.0));
            }
        }
        world.step(1.0 / 60.0);
    }

    for body in world.bodies() {
        assert!(body.pos.is_finite(), "non-finite position {:?}", body.pos);
    }
});
