//! Collision records for a single step
//!
//! The arena keeps its buffer between steps, so once it has grown to the
//! scene's working size no step allocates.

use serde::{Deserialize, Serialize};

use super::body::BodyHandle;

/// A contact found during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    /// Always an actor
    pub a: BodyHandle,
    /// Actor, obstacle or sensor
    pub b: BodyHandle,
    /// Time within the step at which the bodies touch, in [0, 1]. An overlap
    /// found at the start of the step is 0.
    pub dt: f32,
    pub is_sensor: bool,
}

/// Reusable store of collision records
#[derive(Debug, Clone)]
pub struct EventArena {
    records: Vec<CollisionEvent>,
}

impl EventArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Forget all records, keeping the buffer
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn push(&mut self, event: CollisionEvent) {
        if self.records.len() == self.records.capacity() {
            log::warn!(
                "Event arena full at {} records, growing",
                self.records.capacity()
            );
        }
        self.records.push(event);
    }

    /// Make sure `additional` more records fit without reallocating mid-step
    pub fn reserve(&mut self, additional: usize) {
        if self.records.capacity() - self.records.len() < additional {
            log::warn!(
                "Event arena growing from {} to fit {} more records",
                self.records.capacity(),
                additional
            );
            self.records.reserve(additional);
        }
    }

    /// Whether this pair already has a record this step
    pub fn contains_pair(&self, a: BodyHandle, b: BodyHandle) -> bool {
        self.records.iter().any(|e| e.a == a && e.b == b)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    pub fn get(&self, index: usize) -> Option<&CollisionEvent> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollisionEvent> {
        self.records.iter()
    }

    /// Smallest `dt` among the records from `start` on. Ties keep the first found.
    pub fn earliest_since(&self, start: usize) -> Option<f32> {
        self.records
            .get(start..)?
            .iter()
            .map(|e| e.dt)
            .reduce(|earliest, dt| if dt < earliest { dt } else { earliest })
    }

    /// Drop records from `start` on that fail `keep`, preserving the order of the rest
    pub fn retain_since(&mut self, start: usize, mut keep: impl FnMut(&CollisionEvent) -> bool) {
        let mut kept = start;
        for i in start..self.records.len() {
            if keep(&self.records[i]) {
                self.records.swap(kept, i);
                kept += 1;
            }
        }
        self.records.truncate(kept);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{Body, Registry};

    fn handles(n: usize) -> Vec<BodyHandle> {
        let mut registry = Registry::new();
        (0..n)
            .map(|i| registry.add(Body::new(i as f32 * 50.0, 0.0, 5.0, 1.0, false, true)))
            .collect()
    }

    fn event(a: BodyHandle, b: BodyHandle, dt: f32) -> CollisionEvent {
        CollisionEvent {
            a,
            b,
            dt,
            is_sensor: false,
        }
    }

    #[test]
    fn test_clear_keeps_buffer() {
        let h = handles(2);
        let mut arena = EventArena::with_capacity(8);
        arena.push(event(h[0], h[1], 0.5));
        arena.clear();
        assert!(arena.is_empty());
        assert!(arena.capacity() >= 8);
    }

    #[test]
    fn test_contains_pair_is_ordered() {
        let h = handles(2);
        let mut arena = EventArena::with_capacity(4);
        arena.push(event(h[0], h[1], 0.5));
        assert!(arena.contains_pair(h[0], h[1]));
        assert!(!arena.contains_pair(h[1], h[0]));
    }

    #[test]
    fn test_earliest_since_ties_and_offset() {
        let h = handles(4);
        let mut arena = EventArena::with_capacity(4);
        arena.push(event(h[0], h[1], 0.1));
        arena.push(event(h[0], h[2], 0.4));
        arena.push(event(h[0], h[3], 0.3));
        arena.push(event(h[1], h[2], 0.3));
        assert_eq!(arena.earliest_since(0), Some(0.1));
        assert_eq!(arena.earliest_since(1), Some(0.3));
        assert_eq!(arena.earliest_since(4), None);
        assert_eq!(arena.earliest_since(9), None);
    }

    #[test]
    fn test_retain_since_preserves_order() {
        let h = handles(5);
        let mut arena = EventArena::with_capacity(8);
        arena.push(event(h[0], h[1], 0.9));
        arena.push(event(h[0], h[2], 0.2));
        arena.push(event(h[0], h[3], 0.7));
        arena.push(event(h[0], h[4], 0.2));
        arena.push(event(h[1], h[2], 0.2));

        arena.retain_since(1, |e| e.dt <= 0.2);

        let kept: Vec<_> = arena.iter().map(|e| (e.b, e.dt)).collect();
        assert_eq!(kept, vec![(h[1], 0.9), (h[2], 0.2), (h[4], 0.2), (h[2], 0.2)]);
        assert_eq!(arena.get(3).map(|e| e.a), Some(h[1]));
    }

    #[test]
    fn test_grows_past_capacity() {
        let h = handles(2);
        let mut arena = EventArena::with_capacity(1);
        arena.push(event(h[0], h[1], 0.1));
        arena.push(event(h[1], h[0], 0.2));
        assert_eq!(arena.len(), 2);
    }
}
