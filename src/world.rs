//! World and Step Pipeline
//!
//! Owns the body store and runs the fixed per-frame sequence:
//!
//! 1. Re-evaluate attachments
//! 2. Move platforms
//! 3. Carry riders by their platform's displacement
//! 4. Generate dynamic-vs-dynamic manifolds
//! 5. Integrate dynamic bodies (riders follow slopes)
//! 6. Resolve dynamic contacts with impulses
//! 7. Re-evaluate attachments, generate platform manifolds
//! 8. Separate platform contacts by position
//! 9. Positional correction of platform contacts
//! 10. Clear the manifold list
//!
//! Body-vs-body contacts bounce; platform contacts never do, so the two
//! classes are generated and resolved in separate passes.

use core::fmt;

use log::{trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::body::{Body, BodyHandle, BodyMode, Gravity, GravityDir, Group};
use crate::error::PhysicsError;
use crate::manifold::{
    apply_manifold, pos_correction, separate, solve_collision, ContactClass, ContactPair,
};
use crate::material::Material;
use crate::math::V2f;
use crate::platform::{is_carrier_contact, ride, update_attachments, AttachmentChanges};
use crate::shape::Shape;

/// Hard cap on bodies per world.
pub const MAX_BODIES: usize = 4096;
/// Hard cap on manifolds per pass.
pub const MAX_MANIFOLDS: usize = 8192;

// ============================================================================
// Configuration
// ============================================================================

/// World configuration
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    /// Maximum number of bodies
    pub body_capacity: usize,
    /// Maximum manifolds generated per pass; extra contacts are dropped
    pub manifold_capacity: usize,
    /// Solver iterations for both contact passes
    pub iterations: usize,
    /// Gravity given to dynamic bodies created by [`World::add_body`]
    pub gravity: Gravity,
    /// Zero the external impulse along gravity after body-vs-body contacts,
    /// so stacked walkers do not pop each other upward
    pub suppress_vertical_pop: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            body_capacity: MAX_BODIES,
            manifold_capacity: MAX_MANIFOLDS,
            iterations: 10,
            gravity: Gravity::new(GravityDir::Down, 60.0, 40.0), // units/s², units/s
            suppress_vertical_pop: true,
        }
    }
}

impl WorldConfig {
    /// Check limits and gravity parameters.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.body_capacity == 0 || self.body_capacity > MAX_BODIES {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "body_capacity must be within 1..=4096",
            });
        }
        if self.manifold_capacity == 0 || self.manifold_capacity > MAX_MANIFOLDS {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "manifold_capacity must be within 1..=8192",
            });
        }
        if self.iterations == 0 {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "iterations must be positive",
            });
        }
        if !self.gravity.accel.is_finite() || !(self.gravity.cap >= 0.0) {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "gravity must be finite with a non-negative cap",
            });
        }
        Ok(())
    }
}

// ============================================================================
// Step statistics
// ============================================================================

/// What the last step did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Manifolds resolved with impulses
    pub dynamic_contacts: usize,
    /// Manifolds resolved by separation
    pub platform_contacts: usize,
    /// Attachments made
    pub attached: usize,
    /// Attachments lost
    pub detached: usize,
    /// Riders passed to a neighboring platform segment
    pub handoffs: usize,
    /// A manifold pass hit capacity and dropped contacts
    pub truncated: bool,
}

impl StepStats {
    fn record(&mut self, changes: AttachmentChanges) {
        self.attached += changes.attached;
        self.detached += changes.detached;
    }
}

// ============================================================================
// World
// ============================================================================

/// Fixed-capacity simulation world.
pub struct World {
    bodies: Vec<Body>,
    contacts: Vec<ContactPair>,
    config: WorldConfig,
    last_step: StepStats,
}

impl World {
    /// Create an empty world.
    pub fn new(config: WorldConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self {
            bodies: Vec::with_capacity(config.body_capacity),
            contacts: Vec::with_capacity(config.manifold_capacity.min(1024)),
            config,
            last_step: StepStats::default(),
        })
    }

    /// Active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Scene setup
    // ------------------------------------------------------------------------

    /// Add a body built from a material preset. Dynamic results get the
    /// configured gravity; static results become platforms.
    pub fn add_body(
        &mut self,
        shape: Shape,
        position: V2f,
        material: Material,
    ) -> Result<BodyHandle, PhysicsError> {
        let mut body = Body::new(shape, position);
        material.apply(&mut body);
        match body.mode {
            BodyMode::Dynamic => body.gravity = self.config.gravity,
            BodyMode::Static => body.group = Group::Platform(Default::default()),
        }
        self.insert(body)
    }

    /// Add a static platform.
    pub fn add_platform(&mut self, shape: Shape, position: V2f) -> Result<BodyHandle, PhysicsError> {
        self.insert(Body::new_platform(shape, position))
    }

    /// Add a fully configured body.
    pub fn insert(&mut self, body: Body) -> Result<BodyHandle, PhysicsError> {
        if self.bodies.len() >= self.config.body_capacity {
            return Err(PhysicsError::CapacityExceeded {
                resource: "bodies",
                limit: self.config.body_capacity,
            });
        }
        self.bodies.push(body);
        Ok(self.bodies.len() - 1)
    }

    /// Chain two platform segments so riders can walk from `left` to `right`
    /// and back.
    pub fn link_platforms(&mut self, left: BodyHandle, right: BodyHandle) -> Result<(), PhysicsError> {
        let count = self.bodies.len();
        for index in [left, right] {
            let body = self
                .bodies
                .get(index)
                .ok_or(PhysicsError::InvalidBodyIndex { index, count })?;
            if body.platform().is_none() {
                return Err(PhysicsError::NotAPlatform { index });
            }
        }
        if left == right {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "a platform cannot neighbor itself",
            });
        }
        if let Some(links) = self.bodies[left].platform_mut() {
            links.right = Some(right);
        }
        if let Some(links) = self.bodies[right].platform_mut() {
            links.left = Some(left);
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Number of bodies.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// True when the world has no bodies.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// All bodies, indexed by handle.
    #[inline]
    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Body by handle.
    #[inline]
    #[must_use]
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    /// Mutable body by handle, for input and scripting between steps.
    #[inline]
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle)
    }

    /// Position by handle.
    #[inline]
    #[must_use]
    pub fn position(&self, handle: BodyHandle) -> Option<V2f> {
        self.bodies.get(handle).map(|b| b.pos)
    }

    /// Shape by handle.
    #[inline]
    #[must_use]
    pub fn shape(&self, handle: BodyHandle) -> Option<&Shape> {
        self.bodies.get(handle).map(|b| &b.shape)
    }

    /// Mode by handle.
    #[inline]
    #[must_use]
    pub fn mode(&self, handle: BodyHandle) -> Option<BodyMode> {
        self.bodies.get(handle).map(|b| b.mode)
    }

    /// Statistics of the most recent step.
    #[inline]
    #[must_use]
    pub fn last_step(&self) -> StepStats {
        self.last_step
    }

    // ------------------------------------------------------------------------
    // Step
    // ------------------------------------------------------------------------

    /// Advance the simulation by a fixed timestep.
    pub fn step(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            warn!("ignoring step with dt = {dt}");
            return;
        }
        let mut stats = StepStats::default();

        stats.record(update_attachments(&mut self.bodies));
        self.advance_platforms(dt);
        self.carry_riders(dt);

        stats.truncated |= self.generate_contacts(ContactClass::DynamicDynamic).is_err();
        stats.dynamic_contacts = self.contacts.len();
        stats.handoffs = self.integrate_objects(dt);
        self.resolve_dynamic_contacts();

        stats.record(update_attachments(&mut self.bodies));
        stats.truncated |= self.generate_contacts(ContactClass::PlatformDynamic).is_err();
        stats.platform_contacts = self.contacts.len();
        self.separate_platform_contacts();
        self.correct_positions();

        self.contacts.clear();
        trace!("step: {stats:?}");
        self.last_step = stats;
    }

    fn advance_platforms(&mut self, dt: f32) {
        for body in self.bodies.iter_mut().filter(|b| b.mode == BodyMode::Static) {
            let mut displacement = body.integrate(dt, true);
            if let Some(motion) = body.platform_mut().and_then(|links| links.motion.as_mut()) {
                displacement += motion.advance(dt);
            }
            body.pos += displacement;
            body.dpos = displacement;
        }
    }

    fn carry_riders(&mut self, dt: f32) {
        for i in 0..self.bodies.len() {
            if self.bodies[i].mode != BodyMode::Dynamic {
                continue;
            }
            let carry = self.bodies[i]
                .parent()
                .and_then(|p| self.bodies.get(p))
                .filter(|parent| parent.mode == BodyMode::Static)
                .map_or(V2f::ZERO, |parent| {
                    parent.dpos + parent.platform().map_or(V2f::ZERO, |l| l.conveyance * dt)
                });
            let body = &mut self.bodies[i];
            body.pos += carry;
            body.dpos = carry;
        }
    }

    /// Rebuild the manifold list for one contact class. Stops at capacity.
    fn generate_contacts(&mut self, class: ContactClass) -> Result<(), PhysicsError> {
        self.contacts.clear();
        let limit = self.config.manifold_capacity;
        let bodies = &self.bodies;

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<ContactPair>> = (0..bodies.len())
            .into_par_iter()
            .map(|i| contact_row(bodies, i, class))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let rows = (0..bodies.len()).map(|i| contact_row(bodies, i, class));

        for row in rows {
            for contact in row {
                if self.contacts.len() >= limit {
                    warn!("manifold capacity {limit} reached; dropping remaining {class:?} contacts");
                    return Err(PhysicsError::CapacityExceeded {
                        resource: "manifolds",
                        limit,
                    });
                }
                self.contacts.push(contact);
            }
        }
        Ok(())
    }

    /// Returns the number of neighbor hand-offs.
    fn integrate_objects(&mut self, dt: f32) -> usize {
        let mut handoffs = 0;
        for i in 0..self.bodies.len() {
            if self.bodies[i].mode != BodyMode::Dynamic {
                continue;
            }
            let mut body = self.bodies[i];
            let parent = body.parent();
            let own = body.integrate(dt, parent.is_some());
            let displacement = match parent {
                Some(p) => {
                    let ride = ride(&body, p, &self.bodies, own);
                    if ride.parent != p {
                        if let Some(att) = body.attachment_mut() {
                            att.parent = Some(ride.parent);
                        }
                        handoffs += 1;
                    }
                    ride.displacement
                }
                None => own,
            };
            body.pos += displacement;
            body.dpos += displacement;
            self.bodies[i] = body;
        }
        handoffs
    }

    fn resolve_dynamic_contacts(&mut self) {
        for _ in 0..self.config.iterations {
            for contact in &self.contacts {
                // Only reachable when a parent was given mass after the
                // rider attached to it.
                if is_carrier_contact(contact, &self.bodies) {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.bodies, contact.a, contact.b);
                apply_manifold(&contact.manifold, a, b);
            }
        }
        if !self.config.suppress_vertical_pop {
            return;
        }
        for contact in &self.contacts {
            for index in [contact.a, contact.b] {
                let body = &mut self.bodies[index];
                if matches!(body.group, Group::Object(_)) && body.gravity.accel != 0.0 {
                    body.external.remove_along(body.gravity.direction.unit());
                }
            }
        }
    }

    fn separate_platform_contacts(&mut self) {
        for _ in 0..self.config.iterations {
            for contact in &self.contacts {
                let (a, b) = pair_mut(&mut self.bodies, contact.a, contact.b);
                if let Some(m) = solve_collision(a, b) {
                    separate(&m, a, b);
                }
            }
        }
        // A rider keeps no motion along gravity while touching its parent.
        for contact in &self.contacts {
            for (rider, parent) in [(contact.a, contact.b), (contact.b, contact.a)] {
                let body = &mut self.bodies[rider];
                if body.parent() == Some(parent) {
                    body.clear_gravity_axis_motion();
                }
            }
        }
        // Whatever is left is handed to positional correction.
        for contact in &mut self.contacts {
            let (a, b) = (&self.bodies[contact.a], &self.bodies[contact.b]);
            match solve_collision(a, b) {
                Some(m) => contact.manifold = m,
                None => contact.manifold.penetration = 0.0,
            }
        }
    }

    fn correct_positions(&mut self) {
        for contact in &self.contacts {
            let (a, b) = pair_mut(&mut self.bodies, contact.a, contact.b);
            pos_correction(&contact.manifold, a, b);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            bodies: Vec::new(),
            contacts: Vec::new(),
            config: WorldConfig::default(),
            last_step: StepStats::default(),
        }
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("body_count", &self.bodies.len())
            .field("config", &self.config)
            .field("last_step", &self.last_step)
            .finish()
    }
}

/// Manifolds between body `i` and every later body, in index order.
fn contact_row(bodies: &[Body], i: usize, class: ContactClass) -> Vec<ContactPair> {
    let a = &bodies[i];
    bodies
        .iter()
        .enumerate()
        .skip(i + 1)
        .filter_map(|(j, b)| {
            if a.is_immovable() && b.is_immovable() {
                return None;
            }
            if a.is_resting() && b.is_resting() {
                return None;
            }
            if ContactClass::of(a, b) != class {
                return None;
            }
            let manifold = solve_collision(a, b)?;
            Some(ContactPair {
                a: i,
                b: j,
                class,
                manifold,
            })
        })
        .collect()
}

/// Two distinct bodies, `a < b`, borrowed mutably at once.
fn pair_mut(bodies: &mut [Body], a: BodyHandle, b: BodyHandle) -> (&mut Body, &mut Body) {
    debug_assert!(a < b);
    let (head, tail) = bodies.split_at_mut(b);
    (&mut head[a], &mut tail[0])
}
