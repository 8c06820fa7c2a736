//! Circular bodies and the registry that owns them
//!
//! Bodies are stored by value in a single arena and addressed by
//! [`BodyHandle`]. Each body is filed under exactly one [`BodyCategory`]
//! when it is added; the category never changes afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque link from a body back to the entity that owns it (player, checkpoint...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerTag(pub u32);

/// Index of a body in a [`Registry`]
///
/// Handles are invalidated by [`Registry::reset`]; lookups with a stale
/// handle return `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Position of the body in registration order
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// How a body takes part in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyCategory {
    /// Moves, exchanges impulses, gets pushed out of overlaps
    Actor,
    /// Never moves but blocks actors
    Obstacle,
    /// Trigger volume: detection only
    Sensor,
}

impl BodyCategory {
    /// Sensor wins over colliding
    pub fn classify(is_sensor: bool, is_colliding: bool) -> Self {
        if is_sensor {
            BodyCategory::Sensor
        } else if is_colliding {
            BodyCategory::Actor
        } else {
            BodyCategory::Obstacle
        }
    }
}

/// A circular rigid body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Orientation, owned by gameplay code. The engine never reads or writes it.
    pub angle: f32,
    pub mass: f32,
    pub owner: Option<OwnerTag>,
    is_sensor: bool,
    is_colliding: bool,
}

impl Body {
    /// Create a body at rest. `radius` must be positive and `mass` positive for actors.
    pub fn new(x: f32, y: f32, radius: f32, mass: f32, is_sensor: bool, is_colliding: bool) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius,
            angle: 0.0,
            mass,
            owner: None,
            is_sensor,
            is_colliding,
        }
    }

    pub fn with_owner(mut self, owner: OwnerTag) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn is_sensor(&self) -> bool {
        self.is_sensor
    }

    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.is_colliding
    }

    pub fn category(&self) -> BodyCategory {
        BodyCategory::classify(self.is_sensor, self.is_colliding)
    }

    /// Move along the current velocity for `t` units of time
    #[inline]
    pub fn advance(&mut self, t: f32) {
        self.pos += self.vel * t;
    }

    #[inline]
    pub fn is_resting(&self) -> bool {
        self.vel == Vec2::ZERO
    }

    /// Store an orientation wrapped into [-π, π]
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = Vec2::from_angle(angle).to_angle();
    }

    /// Point the body at a world position
    pub fn face_towards(&mut self, target: Vec2) {
        let to = target - self.pos;
        if to != Vec2::ZERO {
            self.angle = to.to_angle();
        }
    }
}

/// Owns every body and the per-category handle lists
#[derive(Debug, Clone, Default)]
pub struct Registry {
    bodies: Vec<Body>,
    actors: Vec<BodyHandle>,
    obstacles: Vec<BodyHandle>,
    sensors: Vec<BodyHandle>,
    generation: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a body and file it under its category
    pub fn add(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle {
            index: self.bodies.len() as u32,
            generation: self.generation,
        };
        match body.category() {
            BodyCategory::Actor => self.actors.push(handle),
            BodyCategory::Obstacle => self.obstacles.push(handle),
            BodyCategory::Sensor => self.sensors.push(handle),
        }
        self.bodies.push(body);
        handle
    }

    /// Drop every body. Outstanding handles become stale.
    pub fn reset(&mut self) {
        log::info!(
            "Registry reset ({} actors, {} obstacles, {} sensors)",
            self.actors.len(),
            self.obstacles.len(),
            self.sensors.len()
        );
        self.bodies.clear();
        self.actors.clear();
        self.obstacles.clear();
        self.sensors.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    #[inline]
    fn is_live(&self, handle: BodyHandle) -> bool {
        handle.generation == self.generation && handle.index() < self.bodies.len()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        if self.is_live(handle) {
            self.bodies.get(handle.index())
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        if self.is_live(handle) {
            self.bodies.get_mut(handle.index())
        } else {
            None
        }
    }

    pub fn category(&self, handle: BodyHandle) -> Option<BodyCategory> {
        self.get(handle).map(Body::category)
    }

    pub fn actors(&self) -> &[BodyHandle] {
        &self.actors
    }

    pub fn obstacles(&self) -> &[BodyHandle] {
        &self.obstacles
    }

    pub fn sensors(&self) -> &[BodyHandle] {
        &self.sensors
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// All bodies with their handles, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        let generation = self.generation;
        self.bodies.iter().enumerate().map(move |(index, body)| {
            (
                BodyHandle {
                    index: index as u32,
                    generation,
                },
                body,
            )
        })
    }

    /// Upper bound on collision records a single step can produce
    pub fn max_pairs(&self) -> usize {
        let actors = self.actors.len();
        actors * actors.saturating_sub(1) / 2 + actors * (self.obstacles.len() + self.sensors.len())
    }

    // Handles below come from this registry's own lists, so they are live.

    #[inline]
    pub(crate) fn body(&self, handle: BodyHandle) -> &Body {
        &self.bodies[handle.index()]
    }

    /// Two distinct bodies, mutably
    pub(crate) fn pair_mut(&mut self, a: BodyHandle, b: BodyHandle) -> (&mut Body, &mut Body) {
        let (i, j) = (a.index(), b.index());
        debug_assert_ne!(i, j, "a body cannot collide with itself");
        if i < j {
            let (lo, hi) = self.bodies.split_at_mut(j);
            (&mut lo[i], &mut hi[0])
        } else {
            let (lo, hi) = self.bodies.split_at_mut(i);
            (&mut hi[0], &mut lo[j])
        }
    }

    pub(crate) fn advance_actors(&mut self, t: f32) {
        for handle in &self.actors {
            self.bodies[handle.index()].advance(t);
        }
    }

    pub(crate) fn damp_actors(&mut self, friction: f32) {
        for handle in &self.actors {
            self.bodies[handle.index()].vel *= friction;
        }
    }
}
