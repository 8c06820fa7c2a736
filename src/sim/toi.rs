//! Swept-circle time of impact
//!
//! Two circles moving at constant velocity touch when
//! |p + v·t| = R, with p and v the relative position and velocity.
//! Squaring gives A·t² + 2B·t + C = 0 with A = v·v, B = v·p, C = p·p − R².

use glam::Vec2;

use super::body::Body;

/// When two circles first touch, in units of the current step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeOfImpact {
    /// Already overlapping now
    Overlapping,
    /// Boundaries meet at this time. May be negative (contact in the past).
    At(f32),
    /// No relative motion, or the paths never come within reach
    Never,
}

impl TimeOfImpact {
    /// Contact time if it falls inside `[0, horizon]`
    pub fn actionable_time(self, horizon: f32) -> Option<f32> {
        match self {
            TimeOfImpact::Overlapping => Some(0.0),
            TimeOfImpact::At(t) if (0.0..=horizon).contains(&t) => Some(t),
            _ => None,
        }
    }
}

/// Solve for the first time the centers come within `reach` of each other
pub fn time_of_impact(pos_a: Vec2, vel_a: Vec2, pos_b: Vec2, vel_b: Vec2, reach: f32) -> TimeOfImpact {
    let p = pos_b - pos_a;
    let c = p.length_squared() - reach * reach;
    if c < 0.0 {
        return TimeOfImpact::Overlapping;
    }

    let v = vel_b - vel_a;
    let a = v.length_squared();
    if a == 0.0 {
        return TimeOfImpact::Never;
    }

    let b = v.dot(p);
    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return TimeOfImpact::Never;
    }

    // a > 0 so early <= late. With c >= 0 both roots share a sign.
    let root = discriminant.sqrt();
    let early = (-b - root) / a;
    let late = (-b + root) / a;
    TimeOfImpact::At(if early >= 0.0 { early } else { late })
}

/// Contact test between an actor and an actor or obstacle
#[inline]
pub fn contact_time(actor: &Body, other: &Body) -> TimeOfImpact {
    time_of_impact(actor.pos, actor.vel, other.pos, other.vel, actor.radius + other.radius)
}

/// Trigger test between an actor and a sensor
///
/// The actor's center has to reach `epsilon` inside the sensor boundary, so an
/// actor grazing the edge does not flicker in and out.
#[inline]
pub fn sensor_time(actor: &Body, sensor: &Body, epsilon: f32) -> TimeOfImpact {
    let reach = (sensor.radius - epsilon).max(0.0);
    time_of_impact(actor.pos, actor.vel, sensor.pos, sensor.vel, reach)
}
