//! Body Model
//!
//! The central mutable record: shape, position, two force accumulators,
//! directional gravity, mass properties, material coefficients and the
//! platform/object role.
//!
//! # Mass
//!
//! `mass` and `inverse_mass` are private and only change through
//! [`Body::set_mass`], which keeps `mass == 0 ⟺ inverse_mass == 0`.
//!
//! # Force accumulators
//!
//! - **internal**: driven by player input or scripts (walking, jumping)
//! - **external**: driven by collision response
//!
//! Both decay per axis every step and are clamped to a per-axis cap. Their
//! impulses double as velocity proxies: this step's displacement is
//! `(internal + external + gravity) * dt`.

use crate::math::{clamp_v2, near_zero, near_zero_v2, project, V2f};
use crate::platform::PlatformMotion;
use crate::shape::{Aabb, Shape};

/// Index of a body in its world. Stable for the life of the world.
pub type BodyHandle = usize;

// ============================================================================
// Mode
// ============================================================================

/// Whether a body responds to impulses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyMode {
    /// Infinite mass; moved only by its own forces or platform motion
    Static,
    /// Integrated every step and pushed by contacts
    Dynamic,
}

// ============================================================================
// Force accumulator
// ============================================================================

/// Impulse accumulator with per-axis decay and cap.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Force {
    /// Accumulated impulse, used as a velocity proxy
    pub impulse: V2f,
    /// Per-axis multiplicative decay applied every step
    pub decay: V2f,
    /// Per-axis magnitude cap
    pub cap: V2f,
}

impl Force {
    /// Empty accumulator with the given decay and cap.
    #[inline]
    #[must_use]
    pub const fn new(decay: V2f, cap: V2f) -> Self {
        Self {
            impulse: V2f::ZERO,
            decay,
            cap,
        }
    }

    /// Add `impulse`, respecting the cap.
    #[inline]
    pub fn push(&mut self, impulse: V2f) {
        self.impulse = clamp_v2(self.impulse + impulse, self.cap);
    }

    /// One step of decay followed by the cap.
    #[inline]
    pub fn decay_step(&mut self) {
        self.impulse = clamp_v2(self.impulse * self.decay, self.cap);
    }

    /// Remove the part of the impulse that points along `direction` (unit).
    /// The opposite part is kept.
    #[inline]
    pub fn cancel_along(&mut self, direction: V2f) {
        let along = self.impulse.dot(direction);
        if along > 0.0 {
            self.impulse -= direction * along;
        }
    }

    /// Remove the whole component along the unit `axis`, both signs.
    pub fn remove_along(&mut self, axis: V2f) {
        self.impulse -= project(self.impulse, axis);
    }
}

impl Default for Force {
    fn default() -> Self {
        Self::new(V2f::splat(0.9), V2f::splat(1000.0))
    }
}

// ============================================================================
// Gravity
// ============================================================================

/// Axis-aligned gravity direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GravityDir {
    /// Toward `-y`
    Up,
    /// Toward `+y`
    Down,
    /// Toward `-x`
    Left,
    /// Toward `+x`
    Right,
}

impl GravityDir {
    /// Unit vector of this direction in screen coordinates.
    #[inline]
    #[must_use]
    pub const fn unit(self) -> V2f {
        match self {
            GravityDir::Up => V2f::new(0.0, -1.0),
            GravityDir::Down => V2f::new(0.0, 1.0),
            GravityDir::Left => V2f::new(-1.0, 0.0),
            GravityDir::Right => V2f::new(1.0, 0.0),
        }
    }

    /// True for `Up` and `Down`.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, GravityDir::Up | GravityDir::Down)
    }
}

/// Per-body directional gravity with its own velocity and cap.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gravity {
    /// Pull direction
    pub direction: GravityDir,
    /// Acceleration (units/s²)
    pub accel: f32,
    /// Maximum fall speed (units/s)
    pub cap: f32,
    /// Current fall speed along `direction`
    pub velocity: f32,
}

impl Gravity {
    /// No pull at all.
    pub const NONE: Self = Self {
        direction: GravityDir::Down,
        accel: 0.0,
        cap: 0.0,
        velocity: 0.0,
    };

    /// Gravity at rest with the given parameters.
    #[inline]
    #[must_use]
    pub const fn new(direction: GravityDir, accel: f32, cap: f32) -> Self {
        Self {
            direction,
            accel,
            cap,
            velocity: 0.0,
        }
    }

    /// Semi-implicit Euler: accelerate, then cap.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.velocity = (self.velocity + self.accel * dt).min(self.cap);
    }

    /// Current gravity velocity as a vector.
    #[inline]
    #[must_use]
    pub fn vector(&self) -> V2f {
        self.direction.unit() * self.velocity
    }

    /// True when this gravity can ever move a body.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.accel != 0.0 || self.velocity != 0.0
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::NONE
    }
}

// ============================================================================
// Group — platform or object role
// ============================================================================

/// Data carried by platform-role bodies.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlatformLinks {
    /// Neighbor segment to the left in a platform chain
    pub left: Option<BodyHandle>,
    /// Neighbor segment to the right in a platform chain
    pub right: Option<BodyHandle>,
    /// Extra velocity given to riders (conveyor belts)
    pub conveyance: V2f,
    /// Scripted movement, advanced once per step
    pub motion: Option<PlatformMotion>,
}

/// Attachment state of an object-role body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Attachment {
    /// Body currently supporting this one. Non-owning; re-validated every step.
    pub parent: Option<BodyHandle>,
    /// Drop the parent on the next attachment pass (set by jumping)
    pub check_parent: bool,
}

/// Role of a body in the attachment system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Group {
    /// Something others can stand on
    Platform(PlatformLinks),
    /// Something that stands on platforms
    Object(Attachment),
}

impl Default for Group {
    fn default() -> Self {
        Group::Object(Attachment::default())
    }
}

// ============================================================================
// Body
// ============================================================================

/// A simulated body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Static or dynamic
    pub mode: BodyMode,
    /// Collision shape
    pub shape: Shape,
    /// Center position
    pub pos: V2f,
    /// Displacement applied during the last step
    pub dpos: V2f,
    /// Player/script forces
    pub internal: Force,
    /// Collision-response forces
    pub external: Force,
    /// Directional gravity
    pub gravity: Gravity,
    mass: f32,
    inverse_mass: f32,
    /// Static friction coefficient
    pub static_friction: f32,
    /// Dynamic friction coefficient
    pub dynamic_friction: f32,
    /// Restitution (bounciness)
    pub restitution: f32,
    /// Platform or object role
    pub group: Group,
}

impl Body {
    /// Default template: a unit-mass dynamic object with no gravity.
    #[must_use]
    pub fn new(shape: Shape, pos: V2f) -> Self {
        Self {
            mode: BodyMode::Dynamic,
            shape,
            pos,
            dpos: V2f::ZERO,
            internal: Force::default(),
            external: Force::default(),
            gravity: Gravity::NONE,
            mass: 1.0,
            inverse_mass: 1.0,
            static_friction: 0.5,
            dynamic_friction: 0.3,
            restitution: 0.2,
            group: Group::default(),
        }
    }

    /// Static platform-role body.
    #[must_use]
    pub fn new_platform(shape: Shape, pos: V2f) -> Self {
        let mut body = Self::new(shape, pos);
        body.set_static();
        body.group = Group::Platform(PlatformLinks::default());
        body
    }

    /// Set the mass, keeping the inverse in sync. Negative or non-finite
    /// values are treated as zero (infinite mass).
    pub fn set_mass(&mut self, mass: f32) {
        if mass.is_finite() && mass > 0.0 {
            self.mass = mass;
            self.inverse_mass = 1.0 / mass;
        } else {
            self.mass = 0.0;
            self.inverse_mass = 0.0;
        }
    }

    /// Mass; zero means immovable.
    #[inline]
    #[must_use]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Inverse mass; zero means immovable.
    #[inline]
    #[must_use]
    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// Make the body static with infinite mass.
    pub fn set_static(&mut self) {
        self.mode = BodyMode::Static;
        self.set_mass(0.0);
    }

    /// True when impulses cannot move this body.
    #[inline]
    #[must_use]
    pub fn is_immovable(&self) -> bool {
        self.inverse_mass == 0.0
    }

    /// Bounding box at the current position.
    #[inline]
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        self.shape.aabb(self.pos)
    }

    /// Velocity proxy: both impulses plus the gravity velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> V2f {
        self.internal.impulse + self.external.impulse + self.gravity.vector()
    }

    /// True when the body neither moved last step nor intends to move.
    #[inline]
    #[must_use]
    pub fn is_resting(&self) -> bool {
        near_zero_v2(self.velocity()) && near_zero_v2(self.dpos)
    }

    /// `½·m·|v|²` over the external impulse.
    #[must_use]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.external.impulse.length_squared()
    }

    /// Supporting body, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<BodyHandle> {
        match self.group {
            Group::Object(att) => att.parent,
            Group::Platform(_) => None,
        }
    }

    /// Platform data, if this is a platform.
    #[inline]
    #[must_use]
    pub fn platform(&self) -> Option<&PlatformLinks> {
        match &self.group {
            Group::Platform(links) => Some(links),
            Group::Object(_) => None,
        }
    }

    /// Mutable platform data, if this is a platform.
    #[inline]
    pub fn platform_mut(&mut self) -> Option<&mut PlatformLinks> {
        match &mut self.group {
            Group::Platform(links) => Some(links),
            Group::Object(_) => None,
        }
    }

    /// Mutable attachment state, if this is an object.
    #[inline]
    pub fn attachment_mut(&mut self) -> Option<&mut Attachment> {
        match &mut self.group {
            Group::Object(att) => Some(att),
            Group::Platform(_) => None,
        }
    }

    /// Install scripted movement on a platform. Ignored for objects.
    pub fn set_platform_motion(&mut self, motion: PlatformMotion) {
        if let Some(links) = self.platform_mut() {
            links.motion = Some(motion);
        }
    }

    /// Add a player/script impulse.
    #[inline]
    pub fn push(&mut self, impulse: V2f) {
        self.internal.push(impulse);
    }

    /// Add a jump impulse and let go of the current parent on the next step.
    pub fn jump(&mut self, impulse: V2f) {
        self.internal.push(impulse);
        if let Some(att) = self.attachment_mut() {
            if att.parent.is_some() {
                att.check_parent = true;
            }
        }
    }

    /// Remove any motion heading along `direction` (unit): impulse parts and,
    /// when gravity pulls that way, the gravity velocity.
    pub fn cancel_motion_along(&mut self, direction: V2f) {
        self.internal.cancel_along(direction);
        self.external.cancel_along(direction);
        if self.gravity.direction.unit().dot(direction) > 0.0 {
            self.gravity.velocity = 0.0;
        }
    }

    /// Drop everything both accumulators carry along the gravity axis.
    pub fn clear_gravity_axis_motion(&mut self) {
        let axis = self.gravity.direction.unit();
        self.internal.remove_along(axis);
        self.external.remove_along(axis);
    }

    /// Decay both accumulators, advance gravity and return this step's
    /// displacement. A supported body holds its gravity velocity at zero.
    pub fn integrate(&mut self, dt: f32, supported: bool) -> V2f {
        self.internal.decay_step();
        self.external.decay_step();
        if supported {
            self.gravity.velocity = 0.0;
        } else {
            self.gravity.advance(dt);
        }
        let v = self.velocity();
        V2f::new(
            if near_zero(v.x * dt) { 0.0 } else { v.x * dt },
            if near_zero(v.y * dt) { 0.0 } else { v.y * dt },
        )
    }
}
