//! Manifolds and Contact Resolution
//!
//! Turns narrow-phase contacts into manifolds carrying combined material
//! coefficients, then resolves them in one of two ways:
//!
//! - [`apply_manifold`]: velocity impulse with Coulomb friction, written to the
//!   external force accumulators (dynamic-vs-dynamic contacts)
//! - [`separate`] and [`pos_correction`]: direct position adjustment by
//!   inverse-mass share (platform contacts)
//!
//! Impulse math follows Randy Gaul's "How to Create a Custom 2D Physics
//! Engine" series.

use crate::body::{Body, BodyHandle};
use crate::collision::body_to_body;
use crate::math::{near_zero, near_zero_v2, V2f};

/// Contacts shallower than this are ignored.
pub const PENETRATION_EPSILON: f32 = 1e-4;
/// Penetration allowed before positional correction kicks in.
pub const POSITION_SLOP: f32 = 0.01;
/// Fraction of the remaining penetration corrected per step.
pub const CORRECTION_PERCENT: f32 = 0.2;
/// Overlap left behind when a body is pushed out of a platform, so the pair
/// still reads as touching on the next step.
pub const ATTACH_SKIN: f32 = 1e-5;

/// Resolved contact between two bodies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Manifold {
    /// Unit normal pointing from the first body toward the second
    pub normal: V2f,
    /// Overlap depth, at least [`PENETRATION_EPSILON`]
    pub penetration: f32,
    /// Product of both restitutions
    pub restitution: f32,
    /// Product of both static frictions
    pub static_friction: f32,
    /// Product of both dynamic frictions
    pub dynamic_friction: f32,
}

/// Resolution semantics a contact needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactClass {
    /// Both bodies have mass: velocity impulses
    DynamicDynamic,
    /// One side is immovable: position separation, no bounce
    PlatformDynamic,
}

impl ContactClass {
    /// Class of the pair `(a, b)`.
    #[inline]
    #[must_use]
    pub fn of(a: &Body, b: &Body) -> Self {
        if a.is_immovable() || b.is_immovable() {
            ContactClass::PlatformDynamic
        } else {
            ContactClass::DynamicDynamic
        }
    }
}

/// Manifold tagged with the pair that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactPair {
    /// First body
    pub a: BodyHandle,
    /// Second body
    pub b: BodyHandle,
    /// Resolution class
    pub class: ContactClass,
    /// Contact data, normal from `a` to `b`
    pub manifold: Manifold,
}

// ============================================================================
// Manifold generation
// ============================================================================

/// Full collision test with combined materials. `None` for separated pairs and
/// for contacts shallower than [`PENETRATION_EPSILON`].
#[must_use]
pub fn solve_collision(a: &Body, b: &Body) -> Option<Manifold> {
    let contact = body_to_body(a, b)?;
    if contact.penetration < PENETRATION_EPSILON {
        return None;
    }
    Some(Manifold {
        normal: contact.normal,
        penetration: contact.penetration,
        restitution: a.restitution * b.restitution,
        static_friction: a.static_friction * b.static_friction,
        dynamic_friction: a.dynamic_friction * b.dynamic_friction,
    })
}

// ============================================================================
// Impulse resolution
// ============================================================================

/// Impulse resolution on the external accumulators. Separating pairs are left
/// alone; two immovable bodies lose their external impulse.
pub fn apply_manifold(m: &Manifold, a: &mut Body, b: &mut Body) {
    let inv_sum = a.inverse_mass() + b.inverse_mass();
    if inv_sum <= f32::EPSILON {
        a.external.impulse = V2f::ZERO;
        b.external.impulse = V2f::ZERO;
        return;
    }

    let rv = b.external.impulse - a.external.impulse;
    let contact_velocity = rv.dot(m.normal);
    if contact_velocity > 0.0 {
        return;
    }

    let j = -(1.0 + m.restitution) * contact_velocity / inv_sum;
    apply_impulse(a, b, m.normal * j);

    // Friction
    let rv = b.external.impulse - a.external.impulse;
    let tangent = rv - m.normal * rv.dot(m.normal);
    if near_zero_v2(tangent) {
        return;
    }
    let tangent = tangent.normalize_or_zero();
    let jt = -rv.dot(tangent) / inv_sum;
    if near_zero(jt) {
        return;
    }
    let friction = if jt.abs() < j * m.static_friction {
        tangent * jt
    } else {
        tangent * (-j * m.dynamic_friction)
    };
    apply_impulse(a, b, friction);
}

#[inline]
fn apply_impulse(a: &mut Body, b: &mut Body, impulse: V2f) {
    let (inv_a, inv_b) = (a.inverse_mass(), b.inverse_mass());
    a.external.impulse -= impulse * inv_a;
    b.external.impulse += impulse * inv_b;
}

// ============================================================================
// Position resolution
// ============================================================================

/// Baumgarte-style correction of the penetration beyond [`POSITION_SLOP`].
pub fn pos_correction(m: &Manifold, a: &mut Body, b: &mut Body) {
    let inv_sum = a.inverse_mass() + b.inverse_mass();
    if inv_sum <= f32::EPSILON {
        return;
    }
    let depth = (m.penetration - POSITION_SLOP).max(0.0);
    let correction = m.normal * (depth / inv_sum * CORRECTION_PERCENT);
    a.pos -= correction * a.inverse_mass();
    b.pos += correction * b.inverse_mass();
}

/// Push the pair apart along the normal until only [`ATTACH_SKIN`] overlap
/// remains, then cancel any motion driving them back together. No bounce.
pub fn separate(m: &Manifold, a: &mut Body, b: &mut Body) {
    let inv_sum = a.inverse_mass() + b.inverse_mass();
    if inv_sum <= f32::EPSILON {
        return;
    }
    let push = m.normal * ((m.penetration - ATTACH_SKIN).max(0.0) / inv_sum);
    if a.inverse_mass() > 0.0 {
        a.pos -= push * a.inverse_mass();
        a.cancel_motion_along(m.normal);
    }
    if b.inverse_mass() > 0.0 {
        b.pos += push * b.inverse_mass();
        b.cancel_motion_along(-m.normal);
    }
}
