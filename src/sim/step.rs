//! Event-ordered sub-stepping
//!
//! One call to [`World::step`] advances every actor by one unit of time.
//! Instead of moving everything and then fixing overlaps, the step sweeps
//! every relevant pair, jumps to the earliest contact, resolves it, and sweeps
//! again from there until the unit is used up. A fast body cannot tunnel
//! through a body it has not already hit this step.
//!
//! Each pair is resolved at most once per step, so the loop runs at most
//! once per pair plus one final free-flight pass.

use super::body::{Body, BodyCategory, BodyHandle};
use super::events::CollisionEvent;
use super::resolve::{push_apart, push_out, resolve_event};
use super::toi::{TimeOfImpact, contact_time, sensor_time};
use super::world::World;

/// Counters for one [`World::step`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Sweeps over the body pairs
    pub sub_steps: u32,
    /// Contacts found inside the remaining time window
    pub detected: usize,
    /// Contacts resolved and reported
    pub resolved: usize,
}

impl World {
    /// Advance the world by one unit of time
    ///
    /// `on_event(actor, other, is_sensor)` runs once per resolved contact, in
    /// non-decreasing time order. Afterwards actor velocities are damped by
    /// the configured friction.
    pub fn step<F>(&mut self, mut on_event: F) -> StepStats
    where
        F: FnMut(&Body, &Body, bool),
    {
        self.arena.clear();
        self.arena.reserve(self.registry.max_pairs());

        let mut stats = StepStats::default();
        let mut t = 0.0_f32;

        while t < 1.0 {
            let first_new = self.arena.len();
            stats.sub_steps += 1;

            self.detect_contacts(t);
            self.detect_sensors(t);
            stats.detected += self.arena.len() - first_new;

            let Some(earliest) = self.arena.earliest_since(first_new) else {
                // Nothing left to hit: fly out the rest of the step
                self.registry.advance_actors(1.0 - t);
                break;
            };

            self.registry.advance_actors(earliest - t);
            t = earliest;

            // Later contacts were computed from positions that are about to
            // change; drop them so the next sweep finds them again.
            self.arena.retain_since(first_new, |e| e.dt <= earliest);

            for index in first_new..self.arena.len() {
                let Some(event) = self.arena.get(index).copied() else {
                    break;
                };
                resolve_event(&mut self.registry, &event, &self.config);
                on_event(
                    self.registry.body(event.a),
                    self.registry.body(event.b),
                    event.is_sensor,
                );
                stats.resolved += 1;
            }
        }

        self.registry.damp_actors(self.config.friction);

        log::debug!(
            "step: {} sub-steps, {} detected, {} resolved",
            stats.sub_steps,
            stats.detected,
            stats.resolved
        );
        stats
    }

    /// Sweep actor/actor and actor/obstacle pairs from frame time `t`
    fn detect_contacts(&mut self, t: f32) {
        let actor_count = self.registry.actors().len();
        let obstacle_count = self.registry.obstacles().len();

        for i in 0..actor_count {
            let a = self.registry.actors()[i];
            for j in (i + 1)..actor_count {
                let b = self.registry.actors()[j];
                self.test_contact(a, b, BodyCategory::Actor, t);
            }
            for k in 0..obstacle_count {
                let b = self.registry.obstacles()[k];
                self.test_contact(a, b, BodyCategory::Obstacle, t);
            }
        }
    }

    fn test_contact(&mut self, a: BodyHandle, b: BodyHandle, other: BodyCategory, t: f32) {
        if self.arena.contains_pair(a, b) {
            return;
        }

        let (actor, body) = self.registry.pair_mut(a, b);
        let toi = contact_time(actor, body);
        let Some(dt) = toi.actionable_time(1.0 - t) else {
            return;
        };

        if toi == TimeOfImpact::Overlapping {
            match other {
                BodyCategory::Actor => push_apart(actor, body),
                _ => push_out(actor, body),
            }
        }

        self.arena.push(CollisionEvent {
            a,
            b,
            dt: t + dt,
            is_sensor: false,
        });
    }

    /// Sweep actor/sensor pairs. Sensors never touch each other or obstacles.
    fn detect_sensors(&mut self, t: f32) {
        let epsilon = self.config.sensor_epsilon;

        for &a in self.registry.actors() {
            for &b in self.registry.sensors() {
                if self.arena.contains_pair(a, b) {
                    continue;
                }
                let toi = sensor_time(self.registry.body(a), self.registry.body(b), epsilon);
                if let Some(dt) = toi.actionable_time(1.0 - t) {
                    self.arena.push(CollisionEvent {
                        a,
                        b,
                        dt: t + dt,
                        is_sensor: true,
                    });
                }
            }
        }
    }
}
