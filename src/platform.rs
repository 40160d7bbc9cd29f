//! Platform Attachment
//!
//! Decides which dynamic bodies stand on which platforms and moves riders
//! with what carries them.
//!
//! # State machine
//!
//! Each object-role body is either unattached or attached to a parent index.
//!
//! - **Attached → unattached**: the pair no longer touches, or the body asked
//!   for a re-check (jumped)
//! - **Unattached → attached**: the body is being pulled by gravity into an
//!   immovable body. The contact normal must line up with gravity by more
//!   than [`ATTACH_ALIGNMENT`]
//!
//! # Slopes
//!
//! A rectangle riding a triangle with vertical gravity follows the slope
//! while it walks. Near the end of the segment the motion blends back to flat
//! or hands off to the neighboring segment in the direction of travel.

use log::debug;

use crate::body::{Body, BodyHandle, BodyMode, Group};
use crate::collision::test_body_vs_body;
use crate::manifold::{solve_collision, ContactPair, ATTACH_SKIN};
use crate::math::{clamp, lerp, sign, sign_v2, V2f};
use crate::shape::Shape;

/// Minimum alignment between the contact normal and gravity for attaching.
pub const ATTACH_ALIGNMENT: f32 = 0.23;

// ============================================================================
// Platform motion
// ============================================================================

/// Scripted back-and-forth movement of a platform. All state lives here, so
/// separate worlds never share it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlatformMotion {
    /// Velocity on the outbound leg (units/s)
    pub velocity: V2f,
    /// Seconds per leg
    pub travel_time: f32,
    /// Seconds to wait at each end
    pub pause: f32,
    elapsed: f32,
    hold: f32,
    forward: bool,
}

impl PlatformMotion {
    /// Move forever at `velocity`.
    #[must_use]
    pub fn constant(velocity: V2f) -> Self {
        Self::ping_pong(velocity, f32::INFINITY, 0.0)
    }

    /// Travel for `travel_time`, wait `pause`, travel back, wait, repeat.
    #[must_use]
    pub fn ping_pong(velocity: V2f, travel_time: f32, pause: f32) -> Self {
        Self {
            velocity,
            travel_time,
            pause: pause.max(0.0),
            elapsed: 0.0,
            hold: 0.0,
            forward: true,
        }
    }

    /// True while heading along `velocity`.
    #[inline]
    #[must_use]
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    /// Displacement for this step.
    pub fn advance(&mut self, dt: f32) -> V2f {
        if self.hold > 0.0 {
            self.hold -= dt;
            return V2f::ZERO;
        }
        let step = if self.forward {
            self.velocity * dt
        } else {
            -self.velocity * dt
        };
        self.elapsed += dt;
        if self.elapsed >= self.travel_time {
            self.elapsed = 0.0;
            self.forward = !self.forward;
            self.hold = self.pause;
        }
        step
    }
}

// ============================================================================
// Attachment state machine
// ============================================================================

/// Transitions made by one attachment pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttachmentChanges {
    /// Bodies that found a parent
    pub attached: usize,
    /// Bodies that lost their parent
    pub detached: usize,
}

/// True when one body of the contact is carrying the other. Such contacts
/// are never bounced.
#[inline]
#[must_use]
pub fn is_carrier_contact(contact: &ContactPair, bodies: &[Body]) -> bool {
    let parent_of = |i: BodyHandle| bodies.get(i).and_then(Body::parent);
    parent_of(contact.a) == Some(contact.b) || parent_of(contact.b) == Some(contact.a)
}

/// Drop stale parents, then attach falling bodies to what they land on.
pub fn update_attachments(bodies: &mut [Body]) -> AttachmentChanges {
    let mut changes = AttachmentChanges::default();

    for i in 0..bodies.len() {
        let Group::Object(att) = bodies[i].group else {
            continue;
        };
        let Some(parent) = att.parent else {
            continue;
        };
        let touching = bodies
            .get(parent)
            .is_some_and(|p| parent != i && test_body_vs_body(&bodies[i], p));
        if att.check_parent || !touching {
            if let Some(att) = bodies[i].attachment_mut() {
                att.parent = None;
                att.check_parent = false;
            }
            changes.detached += 1;
            debug!("body {i} detached from {parent}");
        }
    }

    for i in 0..bodies.len() {
        if !can_attach(&bodies[i]) {
            continue;
        }
        let down = bodies[i].gravity.direction.unit();
        let mut best: Option<(BodyHandle, V2f, f32)> = None;
        for (j, candidate) in bodies.iter().enumerate() {
            if j == i || !candidate.is_immovable() {
                continue;
            }
            let Some(m) = solve_collision(&bodies[i], candidate) else {
                continue;
            };
            if m.normal.dot(down) <= ATTACH_ALIGNMENT {
                continue;
            }
            if best.map_or(true, |(_, _, depth)| m.penetration > depth) {
                best = Some((j, m.normal, m.penetration));
            }
        }
        if let Some((parent, normal, depth)) = best {
            attach(&mut bodies[i], parent, normal, depth);
            changes.attached += 1;
            debug!("body {i} attached to {parent} (depth {depth})");
        }
    }

    changes
}

fn can_attach(body: &Body) -> bool {
    matches!(body.group, Group::Object(att) if att.parent.is_none())
        && body.mode == BodyMode::Dynamic
        && !body.is_immovable()
        && body.gravity.velocity != 0.0
}

/// Nudge the child out of the parent and stop its fall.
fn attach(child: &mut Body, parent: BodyHandle, normal: V2f, depth: f32) {
    child.pos -= normal * (depth - ATTACH_SKIN).max(0.0);
    child.gravity.velocity = 0.0;
    child.cancel_motion_along(normal);
    if let Some(att) = child.attachment_mut() {
        att.parent = Some(parent);
        att.check_parent = false;
    }
}

// ============================================================================
// Riding
// ============================================================================

/// Where an attached body ends up this step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ride {
    /// Displacement to apply
    pub displacement: V2f,
    /// Parent after this step; differs from the old one after a hand-off
    pub parent: BodyHandle,
}

/// Turn an attached body's own displacement `intent` into the displacement
/// it should take along its parent, handing off to a neighbor segment when it
/// runs off the end.
#[must_use]
pub fn ride(rider: &Body, parent: BodyHandle, bodies: &[Body], intent: V2f) -> Ride {
    let flat = Ride {
        displacement: intent,
        parent,
    };
    let Some(platform) = bodies.get(parent) else {
        return flat;
    };
    let Shape::Rect { half_extents: rider_half } = rider.shape else {
        return flat;
    };
    if !rider.gravity.direction.is_vertical() || intent.x == 0.0 {
        return flat;
    }
    let dx = intent.x;
    let neighbor = platform
        .platform()
        .and_then(|links| if dx > 0.0 { links.right } else { links.left })
        .filter(|&n| n != parent && n < bodies.len());

    match platform.shape {
        Shape::Tri(tri) => {
            let along = tri.projection_axis() * dx;
            // Rider corner pressed against the slope.
            let corner = rider.pos - sign_v2(tri.outward_normal()) * rider_half;
            let half_w = tri.half_extents().x;
            let remaining = if dx > 0.0 {
                platform.pos.x + half_w - corner.x
            } else {
                corner.x - (platform.pos.x - half_w)
            };
            let weight = if along.x == 0.0 {
                0.0
            } else {
                clamp(remaining / along.x.abs(), 0.0, 1.0)
            };
            let on_slope = along * weight;
            let leftover = lerp(dx, 0.0, weight);

            let (tail, next) = match neighbor {
                Some(n) if weight < 1.0 => {
                    debug!("rider handed off from {parent} to {n}");
                    (segment_motion(&bodies[n], leftover), n)
                }
                _ => (V2f::new(leftover, 0.0), parent),
            };
            // The slope decides the vertical motion; a jump detaches first.
            Ride {
                displacement: on_slope + tail,
                parent: next,
            }
        }
        Shape::Rect { half_extents } => {
            let edge = if dx > 0.0 {
                platform.pos.x + half_extents.x
            } else {
                platform.pos.x - half_extents.x
            };
            let Some(n) = neighbor else {
                return flat;
            };
            // A slope takes over once the rider corner that will rest on it
            // crosses the edge, a flat segment once the center does.
            let lead = match bodies[n].shape {
                Shape::Tri(tri) => rider.pos.x - sign(tri.outward_normal().x) * rider_half.x,
                Shape::Rect { .. } | Shape::Circle { .. } => rider.pos.x,
            };
            let before = clamp((edge - lead) * dx.signum(), 0.0, dx.abs());
            if before >= dx.abs() {
                return flat;
            }
            let flat_part = before * dx.signum();
            debug!("rider handed off from {parent} to {n}");
            Ride {
                displacement: V2f::new(flat_part, intent.y)
                    + segment_motion(&bodies[n], dx - flat_part),
                parent: n,
            }
        }
        Shape::Circle { .. } => flat,
    }
}

/// Motion of `dx` horizontal travel on `segment`: along its slope for a
/// triangle, flat otherwise.
fn segment_motion(segment: &Body, dx: f32) -> V2f {
    match segment.shape {
        Shape::Tri(tri) => tri.projection_axis() * dx,
        Shape::Rect { .. } | Shape::Circle { .. } => V2f::new(dx, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Attachment, Gravity, GravityDir, PlatformLinks};
    use crate::shape::Corner;

    fn rider(x: f32, y: f32, gravity: GravityDir) -> Body {
        let mut body = Body::new(Shape::rect(0.5, 0.5), V2f::new(x, y));
        body.gravity = Gravity::new(gravity, 60.0, 40.0);
        body
    }

    fn attached_to(mut body: Body, parent: BodyHandle) -> Body {
        body.group = Group::Object(Attachment {
            parent: Some(parent),
            check_parent: false,
        });
        body
    }

    fn assert_v2_near(a: V2f, b: V2f) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_ping_pong_reverses_after_pause() {
        let mut motion = PlatformMotion::ping_pong(V2f::new(10.0, 0.0), 0.45, 0.25);
        let mut travelled = V2f::ZERO;
        for _ in 0..5 {
            travelled += motion.advance(0.1);
        }
        assert!(!motion.is_forward());
        assert_v2_near(travelled, V2f::new(5.0, 0.0));
        // Waiting.
        assert_eq!(motion.advance(0.1), V2f::ZERO);
        assert_eq!(motion.advance(0.1), V2f::ZERO);
        assert_eq!(motion.advance(0.1), V2f::ZERO);
        assert_v2_near(motion.advance(0.1), V2f::new(-1.0, 0.0));
    }

    #[test]
    fn test_constant_motion_never_turns() {
        let mut motion = PlatformMotion::constant(V2f::new(0.0, -2.0));
        for _ in 0..1000 {
            assert_eq!(motion.advance(0.5), V2f::new(0.0, -1.0));
        }
    }

    #[test]
    fn test_falling_body_attaches_and_is_nudged_out() {
        let platform = Body::new_platform(Shape::rect(5.0, 1.0), V2f::new(0.0, 2.0));
        let mut body = rider(0.0, 0.55, GravityDir::Down);
        body.gravity.velocity = 3.0;
        let mut bodies = vec![platform, body];

        let changes = update_attachments(&mut bodies);
        assert_eq!(changes.attached, 1);
        assert_eq!(bodies[1].parent(), Some(0));
        assert_eq!(bodies[1].gravity.velocity, 0.0);
        assert!((bodies[1].pos.y - (0.5 + ATTACH_SKIN)).abs() < 1e-5);
        assert!(test_body_vs_body(&bodies[1], &bodies[0]));
    }

    #[test]
    fn test_side_contact_does_not_attach() {
        let wall = Body::new_platform(Shape::rect(1.0, 5.0), V2f::ZERO);
        let mut body = rider(1.45, 0.0, GravityDir::Down);
        body.gravity.velocity = 3.0;
        let mut bodies = vec![wall, body];
        assert_eq!(update_attachments(&mut bodies).attached, 0);
        assert_eq!(bodies[1].parent(), None);
    }

    #[test]
    fn test_resting_body_without_fall_speed_does_not_attach() {
        let platform = Body::new_platform(Shape::rect(5.0, 1.0), V2f::new(0.0, 2.0));
        let body = rider(0.0, 0.55, GravityDir::Down);
        let mut bodies = vec![platform, body];
        assert_eq!(update_attachments(&mut bodies).attached, 0);
    }

    #[test]
    fn test_dynamic_body_is_not_a_parent() {
        let mut floor = Body::new(Shape::rect(5.0, 1.0), V2f::new(0.0, 2.0));
        floor.set_mass(10.0);
        let mut body = rider(0.0, 0.55, GravityDir::Down);
        body.gravity.velocity = 3.0;
        let mut bodies = vec![floor, body];
        assert_eq!(update_attachments(&mut bodies).attached, 0);
    }

    #[test]
    fn test_upward_gravity_attaches_to_ceiling() {
        let ceiling = Body::new_platform(Shape::rect(5.0, 1.0), V2f::new(0.0, -2.0));
        let mut body = rider(0.0, -0.55, GravityDir::Up);
        body.gravity.velocity = 2.0;
        let mut bodies = vec![ceiling, body];
        assert_eq!(update_attachments(&mut bodies).attached, 1);
        assert_eq!(bodies[1].parent(), Some(0));
    }

    #[test]
    fn test_lost_contact_detaches() {
        let platform = Body::new_platform(Shape::rect(5.0, 1.0), V2f::new(0.0, 2.0));
        let body = attached_to(rider(0.0, 0.0, GravityDir::Down), 0);
        let mut bodies = vec![platform, body];
        let changes = update_attachments(&mut bodies);
        assert_eq!(changes.detached, 1);
        assert_eq!(bodies[1].parent(), None);
    }

    #[test]
    fn test_check_parent_forces_detach() {
        let platform = Body::new_platform(Shape::rect(5.0, 1.0), V2f::new(0.0, 2.0));
        let mut body = attached_to(rider(0.0, 0.5, GravityDir::Down), 0);
        body.jump(V2f::new(0.0, -30.0));
        let mut bodies = vec![platform, body];
        let changes = update_attachments(&mut bodies);
        assert_eq!(changes, AttachmentChanges { attached: 0, detached: 1 });
        assert_eq!(bodies[1].parent(), None);
    }

    #[test]
    fn test_stale_parent_index_is_cleared() {
        let body = attached_to(rider(0.0, 0.0, GravityDir::Down), 7);
        let mut bodies = vec![body];
        update_attachments(&mut bodies);
        assert_eq!(bodies[0].parent(), None);
    }

    #[test]
    fn test_carrier_contact_predicate() {
        let platform = Body::new_platform(Shape::rect(5.0, 1.0), V2f::ZERO);
        let body = attached_to(rider(0.0, -1.5, GravityDir::Down), 0);
        let other = rider(3.0, -1.5, GravityDir::Down);
        let bodies = vec![platform, body, other];
        let manifold = crate::manifold::Manifold {
            normal: V2f::Y,
            penetration: 0.1,
            restitution: 0.0,
            static_friction: 0.0,
            dynamic_friction: 0.0,
        };
        let pair = |a, b| ContactPair {
            a,
            b,
            class: crate::manifold::ContactClass::PlatformDynamic,
            manifold,
        };
        assert!(is_carrier_contact(&pair(0, 1), &bodies));
        assert!(is_carrier_contact(&pair(1, 0), &bodies));
        assert!(!is_carrier_contact(&pair(0, 2), &bodies));
        assert!(!is_carrier_contact(&pair(1, 2), &bodies));
    }

    // Slope riding. The UL ramp below rises to the right along x + y = 0.

    fn ramp(corner: Corner) -> Body {
        Body::new_platform(Shape::triangle(V2f::splat(2.0), corner, false), V2f::ZERO)
    }

    #[test]
    fn test_ride_follows_slope_uphill() {
        let bodies = vec![ramp(Corner::UpLeft)];
        // Lower-right corner at (-1, 1), on the slope.
        let body = attached_to(rider(-1.5, 0.5, GravityDir::Down), 0);
        let ride = ride(&body, 0, &bodies, V2f::new(0.5, 0.0));
        let s = core::f32::consts::FRAC_1_SQRT_2;
        assert_v2_near(ride.displacement, V2f::new(0.5 * s, -0.5 * s));
        assert_eq!(ride.parent, 0);
    }

    #[test]
    fn test_ride_follows_slope_downhill() {
        let bodies = vec![ramp(Corner::UpLeft)];
        let body = attached_to(rider(-0.5, -0.5, GravityDir::Down), 0);
        let ride = ride(&body, 0, &bodies, V2f::new(-0.5, 0.0));
        let s = core::f32::consts::FRAC_1_SQRT_2;
        assert_v2_near(ride.displacement, V2f::new(-0.5 * s, 0.5 * s));
    }

    #[test]
    fn test_ride_blends_to_flat_at_segment_end() {
        let bodies = vec![ramp(Corner::UpLeft)];
        // Corner at (1.5, -1.5): half a unit from the top.
        let body = attached_to(rider(1.0, -2.0, GravityDir::Down), 0);
        let ride = ride(&body, 0, &bodies, V2f::new(1.0, 0.0));
        let s = core::f32::consts::FRAC_1_SQRT_2;
        let weight = 0.5 / s;
        let expected = V2f::new(s, -s) * weight + V2f::new(1.0 - weight, 0.0);
        assert_v2_near(ride.displacement, expected);
        // The corner tops out exactly at the ramp's peak height.
        assert!((ride.displacement.y + 0.5).abs() < 1e-4);
        assert_eq!(ride.parent, 0);
    }

    #[test]
    fn test_ride_hands_off_to_neighbor() {
        let mut slope = ramp(Corner::UpLeft);
        let top = Body::new_platform(Shape::rect(2.0, 1.0), V2f::new(4.0, -1.0));
        if let Some(links) = slope.platform_mut() {
            *links = PlatformLinks {
                right: Some(1),
                ..PlatformLinks::default()
            };
        }
        let bodies = vec![slope, top];
        let body = attached_to(rider(1.0, -2.0, GravityDir::Down), 0);
        let ride = ride(&body, 0, &bodies, V2f::new(1.0, 0.0));
        let weight = 0.5 / core::f32::consts::FRAC_1_SQRT_2;
        assert_eq!(ride.parent, 1);
        // Half a unit up the slope, then flat along the top.
        assert_v2_near(ride.displacement, V2f::new(0.5 + (1.0 - weight), -0.5));
    }

    #[test]
    fn test_ride_hands_off_between_slopes() {
        let mut first = ramp(Corner::UpLeft);
        let mut second = Body::new_platform(
            Shape::triangle(V2f::splat(2.0), Corner::UpLeft, false),
            V2f::new(4.0, -4.0),
        );
        if let Some(links) = first.platform_mut() {
            links.right = Some(1);
        }
        if let Some(links) = second.platform_mut() {
            links.left = Some(0);
        }
        let bodies = vec![first, second];
        let body = attached_to(rider(1.0, -2.0, GravityDir::Down), 0);
        let ride = ride(&body, 0, &bodies, V2f::new(1.0, 0.0));
        let s = core::f32::consts::FRAC_1_SQRT_2;
        // The whole move stays on a 45 degree incline.
        assert_eq!(ride.parent, 1);
        let weight = 0.5 / s;
        let expected = V2f::new(s, -s) * weight + V2f::new(s, -s) * (1.0 - weight);
        assert_v2_near(ride.displacement, expected);
    }

    #[test]
    fn test_ride_ceiling_slope_with_upward_gravity() {
        // DL cut away: solid in the upper right, slope along y = x.
        let bodies = vec![ramp(Corner::DownLeft)];
        // Upper-right corner of the rider at (-1, -1), on the slope.
        let body = attached_to(rider(-1.5, -0.5, GravityDir::Up), 0);
        let ride = ride(&body, 0, &bodies, V2f::new(0.5, 0.0));
        let s = core::f32::consts::FRAC_1_SQRT_2;
        assert_v2_near(ride.displacement, V2f::new(0.5 * s, 0.5 * s));
    }

    #[test]
    fn test_ride_ceiling_slope_dr_end_blend() {
        // DR cut away: solid in the upper left, slope along y = -x.
        let bodies = vec![ramp(Corner::DownRight)];
        // Upper-left corner at (-1.5, 1.5): half a unit from the left end.
        let body = attached_to(rider(-1.0, 2.0, GravityDir::Up), 0);
        let ride = ride(&body, 0, &bodies, V2f::new(-1.0, 0.0));
        let s = core::f32::consts::FRAC_1_SQRT_2;
        let weight = 0.5 / s;
        let expected = V2f::new(-s, s) * weight + V2f::new(-(1.0 - weight), 0.0);
        assert_v2_near(ride.displacement, expected);
    }

    #[test]
    fn test_ride_slope_ignores_vertical_intent() {
        let bodies = vec![ramp(Corner::UpLeft)];
        let body = attached_to(rider(-1.5, 0.5, GravityDir::Down), 0);
        let ride = ride(&body, 0, &bodies, V2f::new(0.5, -0.5));
        let s = core::f32::consts::FRAC_1_SQRT_2;
        assert_v2_near(ride.displacement, V2f::new(0.5 * s, -0.5 * s));
    }

    fn floor_then(slope: Body) -> Vec<Body> {
        // Floor top at y = 0, right edge at x = 0.
        let mut floor = Body::new_platform(Shape::rect(2.0, 1.0), V2f::new(-2.0, 1.0));
        if let Some(links) = floor.platform_mut() {
            links.right = Some(1);
        }
        vec![floor, slope]
    }

    #[test]
    fn test_ride_flat_hands_off_uphill_at_leading_corner() {
        // Surface from (0, 0) up to (4, -4).
        let bodies = floor_then(Body::new_platform(
            Shape::triangle(V2f::splat(2.0), Corner::UpLeft, false),
            V2f::new(2.0, -2.0),
        ));
        // Lower-right corner at x = -0.1.
        let body = attached_to(rider(-0.6, -0.5, GravityDir::Down), 0);
        let s = core::f32::consts::FRAC_1_SQRT_2;

        let short = ride(&body, 0, &bodies, V2f::new(0.05, 0.0));
        assert_eq!(short.parent, 0);
        assert_eq!(short.displacement, V2f::new(0.05, 0.0));

        let onto = ride(&body, 0, &bodies, V2f::new(0.3, 0.0));
        assert_eq!(onto.parent, 1);
        // Flat up to the foot of the ramp, then along it.
        assert_v2_near(onto.displacement, V2f::new(0.1 + 0.2 * s, -0.2 * s));
    }

    #[test]
    fn test_ride_flat_hands_off_downhill_at_trailing_corner() {
        // Surface from (0, 0) down to (4, 4).
        let bodies = floor_then(Body::new_platform(
            Shape::triangle(V2f::splat(2.0), Corner::UpRight, false),
            V2f::new(2.0, 2.0),
        ));
        let s = core::f32::consts::FRAC_1_SQRT_2;

        // Center past the edge, lower-left corner still on the floor.
        let body = attached_to(rider(-0.6, -0.5, GravityDir::Down), 0);
        let stay = ride(&body, 0, &bodies, V2f::new(0.3, 0.0));
        assert_eq!(stay.parent, 0);
        assert_eq!(stay.displacement, V2f::new(0.3, 0.0));

        // Lower-left corner at x = -0.1.
        let body = attached_to(rider(0.4, -0.5, GravityDir::Down), 0);
        let off = ride(&body, 0, &bodies, V2f::new(0.3, 0.0));
        assert_eq!(off.parent, 1);
        assert_v2_near(off.displacement, V2f::new(0.1 + 0.2 * s, 0.2 * s));
    }

    #[test]
    fn test_ride_flat_parent_passes_intent_through() {
        let bodies = vec![Body::new_platform(Shape::rect(5.0, 1.0), V2f::ZERO)];
        let body = attached_to(rider(0.0, -1.5, GravityDir::Down), 0);
        let intent = V2f::new(0.3, -0.2);
        assert_eq!(
            ride(&body, 0, &bodies, intent),
            Ride {
                displacement: intent,
                parent: 0
            }
        );
    }

    #[test]
    fn test_ride_flat_parent_hands_off_past_edge() {
        let mut left = Body::new_platform(Shape::rect(2.0, 1.0), V2f::ZERO);
        let right = Body::new_platform(Shape::rect(2.0, 1.0), V2f::new(4.0, 0.0));
        if let Some(links) = left.platform_mut() {
            links.right = Some(1);
        }
        let bodies = vec![left, right];
        let body = attached_to(rider(1.9, -1.5, GravityDir::Down), 0);
        assert_eq!(ride(&body, 0, &bodies, V2f::new(0.2, 0.0)).parent, 1);
        assert_eq!(ride(&body, 0, &bodies, V2f::new(0.05, 0.0)).parent, 0);
    }

    #[test]
    fn test_ride_sideways_gravity_is_flat() {
        let bodies = vec![ramp(Corner::UpLeft)];
        let body = attached_to(rider(-1.5, 0.5, GravityDir::Left), 0);
        let ride = ride(&body, 0, &bodies, V2f::new(0.5, 0.0));
        assert_eq!(ride.displacement, V2f::new(0.5, 0.0));
    }
}
