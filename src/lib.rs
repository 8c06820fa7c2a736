//! Circle Physics - continuous collision for circular rigid bodies
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, time of impact, sub-stepping, resolution)
//! - `config`: Tunable physics parameters, loadable from JSON
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod sim;

pub use config::PhysicsConfig;
pub use error::ConfigError;
pub use sim::{
    Body, BodyCategory, BodyHandle, CollisionEvent, OwnerTag, StepStats, TimeOfImpact, World,
};

/// Physics configuration constants
pub mod consts {
    /// Minimum impulse applied on actor/actor contact
    pub const DEFAULT_MIN_IMPACT: f32 = 7.0;
    /// Velocity multiplier applied to every actor once per step
    pub const DEFAULT_FRICTION: f32 = 0.95;
    /// Extra penetration required before a sensor triggers
    pub const DEFAULT_SENSOR_EPSILON: f32 = 1.0;
    /// Gap left between an actor and an obstacle after a bounce
    pub const DEFAULT_CLEARANCE: f32 = 2.0;
    /// Preallocated collision records per step
    pub const DEFAULT_EVENT_CAPACITY: usize = 1000;
}
