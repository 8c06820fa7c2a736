//! Collision response
//!
//! Overlaps found at detection time are pushed apart immediately. Contacts are
//! then resolved when the scheduler reaches their time: obstacles reflect the
//! actor, actor pairs exchange an impulse along the contact normal. Sensor
//! events are never resolved physically.

use glam::Vec2;

use super::body::{Body, BodyCategory, Registry};
use super::events::CollisionEvent;
use crate::config::PhysicsConfig;

/// Unit vector from `from` toward `to`; +X when the centers coincide
#[inline]
pub fn contact_normal(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::X)
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Separate two overlapping actors, each moving half the penetration depth
pub fn push_apart(a: &mut Body, b: &mut Body) {
    let offset = b.pos - a.pos;
    let normal = contact_normal(a.pos, b.pos);
    let penetration = a.radius + b.radius - offset.length();
    if penetration <= 0.0 {
        return;
    }
    let half = normal * (penetration * 0.5);
    a.pos -= half;
    b.pos += half;
}

/// Push an actor fully out of an obstacle
pub fn push_out(actor: &mut Body, obstacle: &Body) {
    let normal = contact_normal(actor.pos, obstacle.pos);
    let penetration = actor.radius + obstacle.radius - (obstacle.pos - actor.pos).length();
    if penetration <= 0.0 {
        return;
    }
    actor.pos -= normal * penetration;
}

/// Bounce an actor off an immovable obstacle
///
/// The actor is left `clearance` outside the obstacle so the same contact is
/// not found again straight away.
pub fn bounce_off_obstacle(actor: &mut Body, obstacle: &Body, clearance: f32) {
    let normal = contact_normal(actor.pos, obstacle.pos);
    actor.vel = reflect_velocity(actor.vel, normal);
    actor.pos = obstacle.pos - normal * (actor.radius + obstacle.radius + clearance);
}

/// Exchange a mass-weighted impulse between two actors
///
/// Resting pairs are skipped. The impulse never drops below `min_impact`, so
/// slow contacts still knock the bodies apart.
pub fn exchange_impulse(a: &mut Body, b: &mut Body, min_impact: f32) {
    if a.is_resting() && b.is_resting() {
        return;
    }
    let normal = contact_normal(a.pos, b.pos);
    let relative = b.vel - a.vel;
    let reduced_mass = (a.mass * b.mass) / (a.mass + b.mass);
    let impact = (2.0 * normal.dot(relative) * reduced_mass)
        .abs()
        .max(min_impact);

    a.vel -= normal * (impact / a.mass);
    b.vel += normal * (impact / b.mass);
}

/// Apply the physical response for an event the scheduler has reached
pub fn resolve_event(registry: &mut Registry, event: &CollisionEvent, config: &PhysicsConfig) {
    if event.is_sensor {
        return;
    }
    let category = registry.body(event.b).category();
    let (actor, other) = registry.pair_mut(event.a, event.b);
    match category {
        BodyCategory::Obstacle => bounce_off_obstacle(actor, other, config.clearance),
        BodyCategory::Actor => exchange_impulse(actor, other, config.min_impact),
        BodyCategory::Sensor => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(x: f32, y: f32, r: f32, vx: f32, vy: f32) -> Body {
        Body::new(x, y, r, 1.0, false, true).with_velocity(Vec2::new(vx, vy))
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_push_apart_symmetric() {
        let mut a = actor(0.0, 0.0, 5.0, 0.0, 0.0);
        let mut b = actor(6.0, 0.0, 5.0, 0.0, 0.0);
        push_apart(&mut a, &mut b);
        assert!((a.pos.x - (-2.0)).abs() < 1e-5);
        assert!((b.pos.x - 8.0).abs() < 1e-5);
        assert!(((b.pos - a.pos).length() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_push_apart_coincident_centers() {
        let mut a = actor(3.0, 3.0, 5.0, 0.0, 0.0);
        let mut b = actor(3.0, 3.0, 5.0, 0.0, 0.0);
        push_apart(&mut a, &mut b);
        assert!(((b.pos - a.pos).length() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_push_out_moves_only_actor() {
        let mut a = actor(0.0, 0.0, 5.0, 0.0, 0.0);
        let rock = Body::new(0.0, 12.0, 10.0, 100.0, false, false);
        push_out(&mut a, &rock);
        assert!((a.pos.y - (-3.0)).abs() < 1e-5);
        assert_eq!(rock.pos, Vec2::new(0.0, 12.0));
    }

    #[test]
    fn test_bounce_reverses_normal_component() {
        // Glancing hit: only the component along the normal flips
        let mut a = actor(0.0, 0.0, 5.0, 3.0, 4.0);
        let rock = Body::new(10.0, 0.0, 5.0, 100.0, false, false);
        bounce_off_obstacle(&mut a, &rock, 2.0);
        assert!((a.vel.x - (-3.0)).abs() < 1e-5);
        assert!((a.vel.y - 4.0).abs() < 1e-5);
        assert!((a.pos.x - (-2.0)).abs() < 1e-5);
        assert!(((rock.pos - a.pos).length() - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_equal_masses_exchange_velocity() {
        let mut a = actor(0.0, 0.0, 5.0, 1.0, 0.0);
        let mut b = actor(10.0, 0.0, 5.0, -1.0, 0.0);
        exchange_impulse(&mut a, &mut b, 0.0);
        assert!((a.vel.x - (-1.0)).abs() < 1e-5);
        assert!((b.vel.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_min_impact_floor() {
        let mut a = actor(0.0, 0.0, 5.0, 0.5, 0.0);
        let mut b = actor(10.0, 0.0, 5.0, 0.0, 0.0);
        exchange_impulse(&mut a, &mut b, 7.0);
        assert!((a.vel.x - (0.5 - 7.0)).abs() < 1e-5);
        assert!((b.vel.x - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_mass_weighting() {
        let mut light = actor(0.0, 0.0, 5.0, 2.0, 0.0);
        let mut heavy = actor(10.0, 0.0, 5.0, 0.0, 0.0);
        heavy.mass = 3.0;
        exchange_impulse(&mut light, &mut heavy, 0.0);
        // reduced mass 0.75, impulse 3: momentum is conserved
        assert!((light.vel.x - (-1.0)).abs() < 1e-5);
        assert!((heavy.vel.x - 1.0).abs() < 1e-5);
        let momentum = light.vel.x * light.mass + heavy.vel.x * heavy.mass;
        assert!((momentum - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_resting_pair_untouched() {
        let mut a = actor(0.0, 0.0, 5.0, 0.0, 0.0);
        let mut b = actor(10.0, 0.0, 5.0, 0.0, 0.0);
        exchange_impulse(&mut a, &mut b, 7.0);
        assert!(a.is_resting());
        assert!(b.is_resting());
    }
}
