//! Physics world: bodies, configuration and the per-step event arena

use super::body::{Body, BodyCategory, BodyHandle, Registry};
use super::events::{CollisionEvent, EventArena};
use crate::config::PhysicsConfig;

/// A set of circular bodies advanced together one frame at a time
#[derive(Debug, Clone)]
pub struct World {
    pub(super) config: PhysicsConfig,
    pub(super) registry: Registry,
    pub(super) arena: EventArena,
}

impl Default for World {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl World {
    pub fn new(config: PhysicsConfig) -> Self {
        let arena = EventArena::with_capacity(config.event_capacity);
        Self {
            config,
            registry: Registry::new(),
            arena,
        }
    }

    /// Body factory: at rest, angle 0, no owner
    pub fn create_body(
        x: f32,
        y: f32,
        radius: f32,
        mass: f32,
        is_sensor: bool,
        is_colliding: bool,
    ) -> Body {
        Body::new(x, y, radius, mass, is_sensor, is_colliding)
    }

    /// Register a body. Its category is fixed from here on.
    pub fn add(&mut self, body: Body) -> BodyHandle {
        self.registry.add(body)
    }

    /// Remove every body (level transitions). Old handles go stale.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.registry.get(handle)
    }

    /// Gameplay edits between steps (steering, respawning, turning)
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.registry.get_mut(handle)
    }

    pub fn category(&self, handle: BodyHandle) -> Option<BodyCategory> {
        self.registry.category(handle)
    }

    /// Events resolved by the last step, in resolution order
    pub fn events(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.arena.iter()
    }
}
