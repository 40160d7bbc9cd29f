//! # platform-physics
//!
//! **Rigid-Body Simulation for 2D Platformers**
//!
//! A fixed-timestep engine built around what platform games need: bodies that
//! stand on moving platforms, walk up and down slopes, and bounce off each
//! other, without the jitter of a general-purpose solver.
//!
//! ## Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | **Shapes** | Circles, boxes and right triangles (slopes), with line-only slopes |
//! | **Narrow phase** | Normal and penetration for every shape pair |
//! | **Two contact classes** | Impulses between dynamic bodies, positional separation against platforms |
//! | **Attachment** | Bodies resting on a platform ride it, including conveyor belts |
//! | **Slope riding** | Walking along a slope follows its surface and hands off to linked segments |
//! | **Directional gravity** | Per-body gravity toward any screen edge |
//!
//! ## Coordinates
//!
//! Screen space: `+x` right, `+y` **down**. Positions are body centers.
//!
//! ## Quick Start
//!
//! ```rust
//! use platform_physics::prelude::*;
//!
//! let mut world = World::new(WorldConfig::default()).unwrap();
//! let floor = world
//!     .add_platform(Shape::rect(10.0, 1.0), V2f::new(0.0, 10.0))
//!     .unwrap();
//! let crate_ = world
//!     .add_body(Shape::square(2.0), V2f::new(0.0, 7.0), Material::Wood)
//!     .unwrap();
//!
//! for _ in 0..120 {
//!     world.step(1.0 / 60.0);
//! }
//!
//! let body = world.body(crate_).unwrap();
//! assert_eq!(body.parent(), Some(floor));
//! assert!(body.pos.y < 9.0);
//! ```
//!
//! ## Cargo features
//!
//! - `parallel`: generate manifold rows on the rayon thread pool
//! - `serde`: serialize shapes, materials, gravity and world configuration

pub mod body;
pub mod collision;
pub mod error;
pub mod manifold;
pub mod material;
pub mod math;
pub mod platform;
pub mod shape;
pub mod world;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::body::{
        Attachment, Body, BodyHandle, BodyMode, Force, Gravity, GravityDir, Group, PlatformLinks,
    };
    pub use crate::collision::{
        body_to_body, shape_vs_shape, test_body_vs_body, test_point_vs_body, Contact,
    };
    pub use crate::error::PhysicsError;
    pub use crate::manifold::{ContactClass, ContactPair, Manifold};
    pub use crate::material::Material;
    pub use crate::math::V2f;
    pub use crate::platform::{PlatformMotion, Ride};
    pub use crate::shape::{Aabb, Corner, Shape, Tri, TriFeature};
    pub use crate::world::{StepStats, World, WorldConfig};
}

// Re-export main types at crate root
pub use prelude::*;
