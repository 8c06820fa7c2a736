//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - One unit of time per step
//! - Stable iteration order (registration order)
//! - No rendering or platform dependencies

pub mod body;
pub mod events;
pub mod resolve;
pub mod step;
pub mod toi;
pub mod world;

pub use body::{Body, BodyCategory, BodyHandle, OwnerTag, Registry};
pub use events::{CollisionEvent, EventArena};
pub use resolve::{bounce_off_obstacle, exchange_impulse, push_apart, push_out, reflect_velocity};
pub use step::StepStats;
pub use toi::{TimeOfImpact, contact_time, sensor_time, time_of_impact};
pub use world::World;
