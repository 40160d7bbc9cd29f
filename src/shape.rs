//! Shapes and Bounding Boxes
//!
//! Closed set of collision shapes: circles, axis-aligned rectangles and
//! axis-aligned right triangles. Bodies never rotate, so every shape is
//! described by a center plus fixed extents.
//!
//! # Triangles
//!
//! A [`Tri`] fills half of its bounding box. The hypotenuse is the box
//! diagonal through the center and faces `hypotenuse_corner`, the corner that
//! is cut away. Slope, normals and the slope direction are derived once in
//! [`Tri::new`] and never recomputed.
//!
//! ```text
//!   UL cut away         UR cut away
//!        . C              C .
//!      . |                | .
//!    B---A                A---B
//! ```
//!
//! `A` is the right-angle vertex, `B` shares its row and `C` its column.

use core::f32::consts::{FRAC_1_SQRT_2, PI};

use crate::math::{normalize_or, V2f};

// ============================================================================
// Corner
// ============================================================================

/// Bounding-box corner, in screen orientation (`Up` is `-y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    /// Upper-left
    UpLeft,
    /// Upper-right
    UpRight,
    /// Lower-left
    DownLeft,
    /// Lower-right
    DownRight,
}

impl Corner {
    /// Unit signs of the corner relative to the center, e.g. `UpLeft = (-1, -1)`.
    #[inline]
    #[must_use]
    pub const fn signs(self) -> V2f {
        match self {
            Corner::UpLeft => V2f::new(-1.0, -1.0),
            Corner::UpRight => V2f::new(1.0, -1.0),
            Corner::DownLeft => V2f::new(-1.0, 1.0),
            Corner::DownRight => V2f::new(1.0, 1.0),
        }
    }
}

// ============================================================================
// Tri — axis-aligned right triangle
// ============================================================================

/// Feature of a triangle closest to a query point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriFeature {
    /// Right-angle vertex
    A,
    /// Hypotenuse endpoint on the horizontal leg
    B,
    /// Hypotenuse endpoint on the vertical leg
    C,
    /// Horizontal leg
    AB,
    /// Vertical leg
    AC,
    /// Hypotenuse (the slope)
    BC,
}

/// Right triangle occupying half of its bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "TriParams", into = "TriParams"))]
pub struct Tri {
    half_extents: V2f,
    hypotenuse_corner: Corner,
    line_only: bool,
    slope: f32,
    inward_normal: V2f,
    projection_axis: V2f,
    sin: f32,
    cos: f32,
}

/// Construction parameters of a [`Tri`]; the derived fields are rebuilt on
/// deserialization.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
struct TriParams {
    half_extents: V2f,
    hypotenuse_corner: Corner,
    line_only: bool,
}

#[cfg(feature = "serde")]
impl From<TriParams> for Tri {
    fn from(p: TriParams) -> Self {
        Tri::new(p.half_extents, p.hypotenuse_corner, p.line_only)
    }
}

#[cfg(feature = "serde")]
impl From<Tri> for TriParams {
    fn from(t: Tri) -> Self {
        TriParams {
            half_extents: t.half_extents,
            hypotenuse_corner: t.hypotenuse_corner,
            line_only: t.line_only,
        }
    }
}

impl Tri {
    /// Build a triangle and derive its slope data.
    ///
    /// `line_only` turns the wedge into a one-segment ramp with no leg faces.
    /// Zero-area triangles keep the corner diagonal as their normal.
    #[must_use]
    pub fn new(half_extents: V2f, hypotenuse_corner: Corner, line_only: bool) -> Self {
        let half_extents = half_extents.abs();
        let s = hypotenuse_corner.signs();
        let (hw, hh) = (half_extents.x, half_extents.y);

        let outward = normalize_or(V2f::new(s.x * hh, s.y * hw), s * FRAC_1_SQRT_2);
        let slope = if hw > 0.0 { -s.x * s.y * hh / hw } else { 0.0 };
        // Direction of +x travel along the hypotenuse.
        let projection_axis = normalize_or(V2f::new(hw, -s.x * s.y * hh), V2f::X);

        Self {
            half_extents,
            hypotenuse_corner,
            line_only,
            slope,
            inward_normal: -outward,
            projection_axis,
            sin: projection_axis.y,
            cos: projection_axis.x,
        }
    }

    /// Half-width and half-height of the bounding box.
    #[inline]
    #[must_use]
    pub fn half_extents(&self) -> V2f {
        self.half_extents
    }

    /// The cut-away corner the hypotenuse faces.
    #[inline]
    #[must_use]
    pub fn hypotenuse_corner(&self) -> Corner {
        self.hypotenuse_corner
    }

    /// True for a one-segment ramp.
    #[inline]
    #[must_use]
    pub fn is_line_only(&self) -> bool {
        self.line_only
    }

    /// `dy/dx` of the hypotenuse.
    #[inline]
    #[must_use]
    pub fn slope(&self) -> f32 {
        self.slope
    }

    /// Unit normal from the hypotenuse into the solid.
    #[inline]
    #[must_use]
    pub fn inward_normal(&self) -> V2f {
        self.inward_normal
    }

    /// Unit normal from the hypotenuse out of the solid; the extra separating
    /// axis of a triangle.
    #[inline]
    #[must_use]
    pub fn outward_normal(&self) -> V2f {
        -self.inward_normal
    }

    /// Unit direction along the slope for `+x` travel, `(cos, sin)`.
    #[inline]
    #[must_use]
    pub fn projection_axis(&self) -> V2f {
        self.projection_axis
    }

    /// Sine of the slope angle (negative when the slope rises to the right).
    #[inline]
    #[must_use]
    pub fn sin(&self) -> f32 {
        self.sin
    }

    /// Cosine of the slope angle, never negative.
    #[inline]
    #[must_use]
    pub fn cos(&self) -> f32 {
        self.cos
    }

    /// Extent of the solid behind the hypotenuse along the inward normal.
    /// Zero for line-only ramps.
    #[must_use]
    pub fn thickness(&self) -> f32 {
        if self.line_only {
            return 0.0;
        }
        // Distance from the right-angle vertex to the diagonal.
        self.half_extents.dot(self.inward_normal.abs())
    }

    /// World-space vertices `[A, B, C]` for a triangle centered at `center`.
    #[must_use]
    pub fn vertices(&self, center: V2f) -> [V2f; 3] {
        let s = self.hypotenuse_corner.signs();
        let h = self.half_extents;
        [
            center - s * h,
            center + V2f::new(s.x * h.x, -s.y * h.y),
            center + V2f::new(-s.x * h.x, s.y * h.y),
        ]
    }

    /// Outward unit normal used for `feature` when a contact has no usable
    /// direction of its own. The slope wins at its endpoints and the
    /// horizontal leg wins at the right angle.
    #[must_use]
    pub fn feature_normal(&self, feature: TriFeature) -> V2f {
        let s = self.hypotenuse_corner.signs();
        match feature {
            TriFeature::A | TriFeature::AB => V2f::new(0.0, -s.y),
            TriFeature::AC => V2f::new(-s.x, 0.0),
            TriFeature::B | TriFeature::C | TriFeature::BC => self.outward_normal(),
        }
    }

    /// Signed distances from `local` (relative to the center) to the
    /// horizontal leg, vertical leg and hypotenuse. All three are non-negative
    /// exactly when the point is inside or on the boundary.
    #[must_use]
    pub fn face_distances(&self, local: V2f) -> [(TriFeature, f32); 3] {
        let s = self.hypotenuse_corner.signs();
        let h = self.half_extents;
        [
            (TriFeature::AB, local.y * s.y + h.y),
            (TriFeature::AC, local.x * s.x + h.x),
            (TriFeature::BC, local.dot(self.inward_normal)),
        ]
    }

    /// Face with the smallest inside distance, as `(outward normal, depth)`.
    #[must_use]
    pub fn nearest_face(&self, local: V2f) -> (V2f, f32) {
        let mut best = (TriFeature::BC, f32::INFINITY);
        for (feature, dist) in self.face_distances(local) {
            if dist < best.1 {
                best = (feature, dist);
            }
        }
        (self.feature_normal(best.0), best.1.max(0.0))
    }

    /// Inclusive point containment; a point on the slope is inside.
    #[must_use]
    pub fn contains_local(&self, local: V2f) -> bool {
        let h = self.half_extents;
        if local.x.abs() > h.x || local.y.abs() > h.y {
            return false;
        }
        // Inside the box both legs are satisfied; only the slope decides.
        let along_normal = local.dot(self.inward_normal);
        if self.line_only {
            return along_normal.abs() <= f32::EPSILON * h.max_element().max(1.0);
        }
        along_normal >= 0.0
    }
}

// ============================================================================
// Shape
// ============================================================================

/// Collision shape. Exhaustive matching over this enum is the only dispatch
/// mechanism in the crate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Circle of the given radius
    Circle {
        /// Radius
        radius: f32,
    },
    /// Axis-aligned rectangle
    Rect {
        /// Half-width and half-height
        half_extents: V2f,
    },
    /// Axis-aligned right triangle
    Tri(Tri),
}

impl Shape {
    /// Circle of radius `radius`.
    #[inline]
    #[must_use]
    pub fn circle(radius: f32) -> Self {
        Shape::Circle {
            radius: radius.abs(),
        }
    }

    /// Rectangle from half extents.
    #[inline]
    #[must_use]
    pub fn rect(half_w: f32, half_h: f32) -> Self {
        Shape::Rect {
            half_extents: V2f::new(half_w.abs(), half_h.abs()),
        }
    }

    /// Square with full side length `side`.
    #[inline]
    #[must_use]
    pub fn square(side: f32) -> Self {
        Self::rect(side * 0.5, side * 0.5)
    }

    /// Right triangle; see [`Tri::new`].
    #[inline]
    #[must_use]
    pub fn triangle(half_extents: V2f, hypotenuse_corner: Corner, line_only: bool) -> Self {
        Shape::Tri(Tri::new(half_extents, hypotenuse_corner, line_only))
    }

    /// Half extents of the bounding box.
    #[must_use]
    pub fn half_extents(&self) -> V2f {
        match self {
            Shape::Circle { radius } => V2f::splat(*radius),
            Shape::Rect { half_extents } => *half_extents,
            Shape::Tri(tri) => tri.half_extents(),
        }
    }

    /// Area used to derive mass from density.
    #[must_use]
    pub fn area(&self) -> f32 {
        match self {
            Shape::Circle { radius } => PI * radius * radius,
            Shape::Rect { half_extents } => 4.0 * half_extents.x * half_extents.y,
            Shape::Tri(tri) => 2.0 * tri.half_extents().x * tri.half_extents().y,
        }
    }

    /// Bounding box of this shape centered at `position`.
    #[inline]
    #[must_use]
    pub fn aabb(&self, position: V2f) -> Aabb {
        Aabb::from_center(position, self.half_extents())
    }
}

// ============================================================================
// AABB
// ============================================================================

/// Axis-aligned bounding box, derived on demand and never stored on bodies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: V2f,
    /// Maximum corner
    pub max: V2f,
}

impl Aabb {
    /// Box from explicit corners.
    #[inline]
    #[must_use]
    pub const fn new(min: V2f, max: V2f) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with the given half extents.
    #[inline]
    #[must_use]
    pub fn from_center(center: V2f, half_extents: V2f) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Inclusive overlap test; shared borders count as intersecting.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Inclusive point containment.
    #[inline]
    #[must_use]
    pub fn contains_point(&self, point: V2f) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> V2f {
        (self.min + self.max) * 0.5
    }

    /// Half width and half height.
    #[inline]
    #[must_use]
    pub fn half_extents(&self) -> V2f {
        (self.max - self.min) * 0.5
    }
}
