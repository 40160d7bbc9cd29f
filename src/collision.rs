//! Narrow-Phase Collision
//!
//! Pairwise shape tests producing a contact normal and penetration depth.
//!
//! # Dispatch
//!
//! Shapes are ordered `Rect < Circle < Tri`. Each unordered pair is
//! implemented once with the lower shape first; the reverse order calls the
//! same test with swapped arguments and negates the normal. Triangle pairs
//! never collide.
//!
//! | first \ second | Rect          | Circle          | Tri           |
//! |----------------|---------------|-----------------|---------------|
//! | Rect           | rect_vs_rect  | rect_vs_circle  | rect_vs_tri   |
//! | Circle         | (swap)        | circle_vs_circle| circle_vs_tri |
//! | Tri            | (swap)        | (swap)          | none          |
//!
//! # Boundary policy
//!
//! Every test takes a `margin`. With a margin of zero a pair must overlap by
//! a strictly positive amount; exactly touching shapes do not collide. The
//! overlap query [`test_body_vs_body`] uses [`CONTACT_TOLERANCE`] instead,
//! so bodies resting within that distance count as touching.

use crate::body::Body;
use crate::math::{normalize_or, sign, V2f};
use crate::shape::{Aabb, Shape, Tri, TriFeature};

/// Distance within which [`test_body_vs_body`] reports contact.
pub const CONTACT_TOLERANCE: f32 = 1e-3;

/// Raw narrow-phase result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first shape toward the second
    pub normal: V2f,
    /// Overlap depth along `normal`
    pub penetration: f32,
}

impl Contact {
    /// Same contact seen from the other body.
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            penetration: self.penetration,
        }
    }
}

// ============================================================================
// Public entry points
// ============================================================================

/// Narrow phase for two bodies; `None` unless they overlap.
#[inline]
#[must_use]
pub fn body_to_body(a: &Body, b: &Body) -> Option<Contact> {
    shape_vs_shape(a.pos, &a.shape, b.pos, &b.shape)
}

/// Narrow phase for two positioned shapes; `None` unless they overlap.
#[inline]
#[must_use]
pub fn shape_vs_shape(a_pos: V2f, a: &Shape, b_pos: V2f, b: &Shape) -> Option<Contact> {
    collide(a_pos, a, b_pos, b, 0.0)
}

/// Cheap "still touching" query used to re-validate parents.
#[inline]
#[must_use]
pub fn test_body_vs_body(a: &Body, b: &Body) -> bool {
    if !a.aabb().intersects(&grown(b)) {
        return false;
    }
    collide(a.pos, &a.shape, b.pos, &b.shape, CONTACT_TOLERANCE).is_some()
}

/// Inclusive point query; a point on a triangle's slope is inside.
#[must_use]
pub fn test_point_vs_body(point: V2f, body: &Body) -> bool {
    let local = point - body.pos;
    match &body.shape {
        Shape::Circle { radius } => local.length_squared() <= radius * radius,
        Shape::Rect { half_extents } => {
            local.x.abs() <= half_extents.x && local.y.abs() <= half_extents.y
        }
        Shape::Tri(tri) => tri.contains_local(local),
    }
}

fn grown(body: &Body) -> Aabb {
    Aabb::from_center(body.pos, body.shape.half_extents() + CONTACT_TOLERANCE)
}

fn collide(a_pos: V2f, a: &Shape, b_pos: V2f, b: &Shape, margin: f32) -> Option<Contact> {
    match (a, b) {
        (Shape::Rect { half_extents: ha }, Shape::Rect { half_extents: hb }) => {
            rect_vs_rect(a_pos, *ha, b_pos, *hb, margin)
        }
        (Shape::Rect { half_extents }, Shape::Circle { radius }) => {
            rect_vs_circle(a_pos, *half_extents, b_pos, *radius, margin)
        }
        (Shape::Rect { half_extents }, Shape::Tri(tri)) => {
            rect_vs_tri(a_pos, *half_extents, b_pos, tri, margin)
        }
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_vs_circle(a_pos, *ra, b_pos, *rb, margin)
        }
        (Shape::Circle { radius }, Shape::Tri(tri)) => {
            circle_vs_tri(a_pos, *radius, b_pos, tri, margin)
        }
        (Shape::Circle { radius }, Shape::Rect { half_extents }) => {
            rect_vs_circle(b_pos, *half_extents, a_pos, *radius, margin).map(Contact::flipped)
        }
        (Shape::Tri(tri), Shape::Rect { half_extents }) => {
            rect_vs_tri(b_pos, *half_extents, a_pos, tri, margin).map(Contact::flipped)
        }
        (Shape::Tri(tri), Shape::Circle { radius }) => {
            circle_vs_tri(b_pos, *radius, a_pos, tri, margin).map(Contact::flipped)
        }
        (Shape::Tri(_), Shape::Tri(_)) => None,
    }
}

// ============================================================================
// Pair tests
// ============================================================================

/// Separating axes on x and y; resolves along the axis of least overlap.
fn rect_vs_rect(a_pos: V2f, a_half: V2f, b_pos: V2f, b_half: V2f, margin: f32) -> Option<Contact> {
    let delta = b_pos - a_pos;
    let overlap = (a_half + b_half) - delta.abs();
    if overlap.x <= -margin || overlap.y <= -margin {
        return None;
    }
    if overlap.x < overlap.y {
        Some(Contact {
            normal: V2f::new(sign(delta.x), 0.0),
            penetration: overlap.x,
        })
    } else {
        Some(Contact {
            normal: V2f::new(0.0, sign(delta.y)),
            penetration: overlap.y,
        })
    }
}

/// Voronoi classification of the circle center against the rectangle.
fn rect_vs_circle(
    rect_pos: V2f,
    half: V2f,
    center: V2f,
    radius: f32,
    margin: f32,
) -> Option<Contact> {
    let min = rect_pos - half;
    let max = rect_pos + half;
    let left = center.x < min.x;
    let right = center.x > max.x;
    let up = center.y < min.y;
    let down = center.y > max.y;

    if (left || right) && (up || down) {
        let corner = V2f::new(
            if left { min.x } else { max.x },
            if up { min.y } else { max.y },
        );
        return circle_vs_circle(corner, 0.0, center, radius, margin);
    }
    rect_vs_rect(rect_pos, half, center, V2f::splat(radius), margin)
}

/// Distance test between two circles. Coincident centers resolve along `+x`.
fn circle_vs_circle(a_pos: V2f, ra: f32, b_pos: V2f, rb: f32, margin: f32) -> Option<Contact> {
    let delta = b_pos - a_pos;
    let reach = ra + rb;
    let dist_sq = delta.length_squared();
    let limit = reach + margin;
    if limit <= 0.0 || dist_sq >= limit * limit {
        return None;
    }
    let dist = dist_sq.sqrt();
    if dist <= f32::EPSILON {
        return Some(Contact {
            normal: V2f::X,
            penetration: ra.max(rb),
        });
    }
    Some(Contact {
        normal: delta / dist,
        penetration: reach - dist,
    })
}

/// Bounding-box axes plus the slope normal.
///
/// The hypotenuse passes through the triangle's center, so along the outward
/// normal the triangle spans `[-thickness, 0]` and the rectangle spans
/// `sep ± reach`. A line-only ramp has zero thickness and is tested from both
/// sides.
fn rect_vs_tri(rect_pos: V2f, half: V2f, tri_pos: V2f, tri: &Tri, margin: f32) -> Option<Contact> {
    let boxed = rect_vs_rect(rect_pos, half, tri_pos, tri.half_extents(), margin)?;

    let axis = tri.outward_normal();
    let reach = half.dot(axis.abs());
    let sep = (rect_pos - tri_pos).dot(axis);
    let front = reach - sep;
    let back = reach + sep + tri.thickness();
    if front <= -margin || back <= -margin {
        return None;
    }

    let slope = if front <= back {
        Contact {
            normal: -axis,
            penetration: front,
        }
    } else {
        Contact {
            normal: axis,
            penetration: back,
        }
    };
    Some(if slope.penetration < boxed.penetration {
        slope
    } else {
        boxed
    })
}

/// Closest-point test against the triangle (or the ramp segment).
fn circle_vs_tri(
    center: V2f,
    radius: f32,
    tri_pos: V2f,
    tri: &Tri,
    margin: f32,
) -> Option<Contact> {
    let delta = (center - tri_pos).abs();
    let limit = tri.half_extents() + radius + margin;
    if delta.x >= limit.x || delta.y >= limit.y {
        return None;
    }

    let [a, b, c] = tri.vertices(tri_pos);
    if tri.is_line_only() {
        let closest = closest_point_on_segment(b, c, center);
        let to_closest = closest - center;
        let dist = to_closest.length();
        if dist >= radius + margin {
            return None;
        }
        let facing = if (center - tri_pos).dot(tri.outward_normal()) >= 0.0 {
            -tri.outward_normal()
        } else {
            tri.outward_normal()
        };
        return Some(Contact {
            normal: normalize_or(to_closest, facing),
            penetration: radius - dist,
        });
    }

    match closest_point_on_triangle(center, a, b, c) {
        None => {
            let (outward, depth) = tri.nearest_face(center - tri_pos);
            Some(Contact {
                normal: -outward,
                penetration: radius + depth,
            })
        }
        Some((closest, feature)) => {
            let to_closest = closest - center;
            let dist = to_closest.length();
            if dist >= radius + margin {
                return None;
            }
            Some(Contact {
                normal: normalize_or(to_closest, -tri.feature_normal(feature)),
                penetration: radius - dist,
            })
        }
    }
}

// ============================================================================
// Closest-point helpers
// ============================================================================

fn closest_point_on_segment(seg_a: V2f, seg_b: V2f, point: V2f) -> V2f {
    let ab = seg_b - seg_a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return seg_a;
    }
    let t = ((point - seg_a).dot(ab) / len_sq).clamp(0.0, 1.0);
    seg_a + ab * t
}

/// Voronoi-region closest point (Ericson, Real-Time Collision Detection
/// §5.1.5). Returns `None` when `p` is inside the triangle.
fn closest_point_on_triangle(p: V2f, a: V2f, b: V2f, c: V2f) -> Option<(V2f, TriFeature)> {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return Some((a, TriFeature::A));
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return Some((b, TriFeature::B));
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return Some((a + ab * v, TriFeature::AB));
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return Some((c, TriFeature::C));
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return Some((a + ac * w, TriFeature::AC));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return Some((b + (c - b) * w, TriFeature::BC));
    }

    None
}
