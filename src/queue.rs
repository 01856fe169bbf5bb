use std::cmp::Ordering;
use std::collections::BTreeMap;

use geo::{GeoFloat, Coordinate};

use crate::events::{NewEvent, SweepEvent};

/// Ordering key of the event queue: decreasing `y`, then increasing
/// `x`, so the sweep line travels top to bottom and ties resolve west
/// to east.
///
/// Equality is epsilon-tolerant: two numerically close points collapse
/// to one key. This is a correctness requirement, not an optimization;
/// reporting depends on all roles at a physical point being merged into
/// a single node. The tolerance is carried on the key (every key in a
/// queue shares the queue's epsilon), keeping it instance state rather
/// than a global.
#[derive(Debug, Clone, Copy)]
struct QueueKey<T: GeoFloat> {
    point: Coordinate<T>,
    eps: T,
}

impl<T: GeoFloat> Ord for QueueKey<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        let res = other.point.y - self.point.y;
        if res.abs() >= self.eps {
            return if res < T::zero() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        let res = self.point.x - other.point.x;
        if res.abs() < self.eps {
            Ordering::Equal
        } else if res < T::zero() {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

impl<T: GeoFloat> PartialOrd for QueueKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: GeoFloat> PartialEq for QueueKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// Assert total equality; coordinates are validated finite on input.
impl<T: GeoFloat> Eq for QueueKey<T> {}

/// The pending events, ordered by sweep order.
///
/// An ordered map from (epsilon-collapsed) points to their single
/// [`SweepEvent`] node, with merge-on-duplicate insertion and
/// pop-minimum.
pub(crate) struct EventQueue<T: GeoFloat> {
    map: BTreeMap<QueueKey<T>, SweepEvent<T>>,
    eps: T,
}

impl<T: GeoFloat> EventQueue<T> {
    pub(crate) fn new(eps: T) -> Self {
        EventQueue {
            map: BTreeMap::new(),
            eps,
        }
    }

    fn key(&self, point: Coordinate<T>) -> QueueKey<T> {
        QueueKey {
            point,
            eps: self.eps,
        }
    }

    /// Merge into the node at the event's point, or insert a new node.
    pub(crate) fn push(&mut self, event: NewEvent<T>) {
        if let Some(existing) = self.find_mut(event.point()) {
            // A node is marked reported only after it is popped, and
            // popped nodes never re-enter the queue.
            debug_assert!(
                !existing.is_reported,
                "crossing rediscovered at an already reported point"
            );
            existing.merge(event);
            return;
        }
        self.insert(SweepEvent::new(event, self.eps));
    }

    /// Insert a node directly; the caller has established that no node
    /// exists at its point.
    pub(crate) fn insert(&mut self, event: SweepEvent<T>) {
        self.map.insert(self.key(event.point), event);
    }

    /// Epsilon-exact lookup of the node at `point`.
    pub(crate) fn find_mut(&mut self, point: Coordinate<T>) -> Option<&mut SweepEvent<T>> {
        let key = self.key(point);
        self.map.get_mut(&key)
    }

    /// Remove and return the minimum node in sweep order.
    pub(crate) fn pop(&mut self) -> Option<SweepEvent<T>> {
        self.map.pop_first().map(|(_, event)| event)
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}
