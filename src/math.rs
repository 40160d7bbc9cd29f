//! Vector and Scalar Utilities
//!
//! Thin layer over [`glam::Vec2`] with the handful of scalar helpers the
//! collision and solver code leans on.
//!
//! # Conventions
//!
//! - Screen coordinates: `+x` right, `+y` down
//! - "Near zero" means strictly inside `±EPSILON`
//! - Every normalization goes through a helper with an explicit zero-guard

/// 2D vector used for positions, displacements, impulses and normals.
pub type V2f = glam::Vec2;

/// Tolerance for near-zero tests on velocities, displacements and impulses.
pub const EPSILON: f32 = 1e-4;

// ============================================================================
// Scalar helpers
// ============================================================================

/// True when `value` lies strictly within `±EPSILON`.
#[inline]
#[must_use]
pub fn near_zero(value: f32) -> bool {
    value.abs() < EPSILON
}

/// Sign of `value` as `±1.0`. Zero maps to `+1.0` so it can seed a normal.
#[inline]
#[must_use]
pub fn sign(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Clamp `value` into `[lo, hi]`. Unlike [`f32::clamp`] this never panics on
/// an inverted range; `lo` wins.
#[inline]
#[must_use]
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}

/// Linear interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// ============================================================================
// Vector helpers
// ============================================================================

/// True when both components are near zero.
#[inline]
#[must_use]
pub fn near_zero_v2(v: V2f) -> bool {
    near_zero(v.x) && near_zero(v.y)
}

/// Per-axis clamp of `v` into `[-cap, cap]`.
#[inline]
#[must_use]
pub fn clamp_v2(v: V2f, cap: V2f) -> V2f {
    V2f::new(clamp(v.x, -cap.x, cap.x), clamp(v.y, -cap.y, cap.y))
}

/// Normalize `v`, returning `fallback` when `v` has no usable length.
#[inline]
#[must_use]
pub fn normalize_or(v: V2f, fallback: V2f) -> V2f {
    v.try_normalize().unwrap_or(fallback)
}

/// Component-wise sign, zero mapping to `+1`.
#[inline]
#[must_use]
pub fn sign_v2(v: V2f) -> V2f {
    V2f::new(sign(v.x), sign(v.y))
}

/// Component of `v` along the unit vector `axis`.
#[inline]
#[must_use]
pub fn project(v: V2f, axis: V2f) -> V2f {
    axis * v.dot(axis)
}
