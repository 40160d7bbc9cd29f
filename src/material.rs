//! Material Presets
//!
//! Named `(density, restitution)` bundles so scenes never hand-tune
//! coefficients. Mass is derived as `density * shape area`; a zero density
//! yields a static body.
//!
//! # Presets
//!
//! | Material     | Density | Restitution |
//! |--------------|---------|-------------|
//! | `Rock`       | 0.6     | 0.1         |
//! | `Wood`       | 0.3     | 0.2         |
//! | `Metal`      | 1.2     | 0.05        |
//! | `BouncyBall` | 0.3     | 0.8         |
//! | `SuperBall`  | 0.3     | 0.95        |
//! | `Pillow`     | 0.1     | 0.2         |
//! | `Static`     | 0.0     | 0.4         |
//!
//! Friction is not part of a preset; bodies keep the template's
//! coefficients.

use crate::body::{Body, BodyMode};

/// Material preset applied when a body is added to a world.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    /// Heavy, barely bounces
    Rock,
    /// Light, slightly springy
    Wood,
    /// Heaviest, dead bounce
    Metal,
    /// Light and bouncy
    BouncyBall,
    /// Light and nearly elastic
    SuperBall,
    /// Very light, soft
    Pillow,
    /// Immovable
    Static,
    /// Explicit coefficients
    Custom {
        /// Mass per unit area
        density: f32,
        /// Bounciness
        restitution: f32,
    },
}

impl Material {
    /// Mass per unit area.
    #[must_use]
    pub const fn density(&self) -> f32 {
        match self {
            Material::Rock => 0.6,
            Material::Wood => 0.3,
            Material::Metal => 1.2,
            Material::BouncyBall => 0.3,
            Material::SuperBall => 0.3,
            Material::Pillow => 0.1,
            Material::Static => 0.0,
            Material::Custom { density, .. } => *density,
        }
    }

    /// Restitution coefficient.
    #[must_use]
    pub const fn restitution(&self) -> f32 {
        match self {
            Material::Rock => 0.1,
            Material::Wood => 0.2,
            Material::Metal => 0.05,
            Material::BouncyBall => 0.8,
            Material::SuperBall => 0.95,
            Material::Pillow => 0.2,
            Material::Static => 0.4,
            Material::Custom { restitution, .. } => *restitution,
        }
    }

    /// Set mass from density and shape area, restitution, and the mode that
    /// goes with the resulting mass.
    pub fn apply(&self, body: &mut Body) {
        body.restitution = self.restitution();
        body.set_mass(self.density() * body.shape.area());
        if body.is_immovable() {
            body.set_static();
        } else {
            body.mode = BodyMode::Dynamic;
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::Rock
    }
}
