use geo::{GeoFloat, Coordinate};
use smallvec::SmallVec;

use crate::geom::snap_coord;

/// Segments filling one role at an event point. Most points see one or
/// two segments; star configurations spill to the heap.
pub(crate) type RoleSet = SmallVec<[usize; 2]>;

/// Tag of the event variant that founded a queue node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    Start,
    Finish,
    Interior,
}

/// A freshly discovered event, before it is merged into the queue.
///
/// Each variant carries exactly the role data it can produce: an end
/// point names one segment, a discovered crossing names the two
/// status-adjacent segments that produced it.
#[derive(Debug, Clone, Copy)]
pub(crate) enum NewEvent<T: GeoFloat> {
    /// A segment starts (upper end point) here.
    Start { point: Coordinate<T>, segment: usize },
    /// A segment ends (lower end point) here.
    Finish { point: Coordinate<T>, segment: usize },
    /// Two segments cross here without either ending.
    Interior { point: Coordinate<T>, pair: [usize; 2] },
}

impl<T: GeoFloat> NewEvent<T> {
    pub(crate) fn point(&self) -> Coordinate<T> {
        match *self {
            NewEvent::Start { point, .. }
            | NewEvent::Finish { point, .. }
            | NewEvent::Interior { point, .. } => point,
        }
    }

    pub(crate) fn kind(&self) -> EventKind {
        match self {
            NewEvent::Start { .. } => EventKind::Start,
            NewEvent::Finish { .. } => EventKind::Finish,
            NewEvent::Interior { .. } => EventKind::Interior,
        }
    }
}

/// A queue node: a point plus every role discovered at that point so
/// far.
///
/// The queue keeps exactly one node per (epsilon-collapsed) point, so
/// reporting sees all roles at a point at once. Merging an event of a
/// kind other than the founding one sets `check_duplicates`: the same
/// segment may then sit in `interior` as well as in an end-point role,
/// and [`SweepEvent::reconcile`] must run before the roles are used.
#[derive(Debug, Clone)]
pub(crate) struct SweepEvent<T: GeoFloat> {
    pub(crate) point: Coordinate<T>,
    pub(crate) kind: EventKind,
    /// Segments starting here.
    pub(crate) from: RoleSet,
    /// Segments ending here.
    pub(crate) to: RoleSet,
    /// Segments passing through here.
    pub(crate) interior: RoleSet,
    pub(crate) check_duplicates: bool,
    pub(crate) is_reported: bool,
}

impl<T: GeoFloat> SweepEvent<T> {
    pub(crate) fn new(event: NewEvent<T>, eps: T) -> Self {
        let mut node = SweepEvent {
            point: snap_coord(event.point(), eps),
            kind: event.kind(),
            from: RoleSet::new(),
            to: RoleSet::new(),
            interior: RoleSet::new(),
            check_duplicates: false,
            is_reported: false,
        };
        node.fill_role(event);
        node
    }

    /// Merge another event discovered at this node's point.
    pub(crate) fn merge(&mut self, event: NewEvent<T>) {
        if event.kind() != self.kind {
            self.check_duplicates = true;
        }
        self.fill_role(event);
    }

    fn fill_role(&mut self, event: NewEvent<T>) {
        match event {
            NewEvent::Start { segment, .. } => self.from.push(segment),
            NewEvent::Finish { segment, .. } => self.to.push(segment),
            NewEvent::Interior { pair, .. } => {
                for segment in pair {
                    if !self.interior.contains(&segment) {
                        self.interior.push(segment);
                    }
                }
            }
        }
    }

    /// Drop interior roles that are end-point roles at this point: a
    /// segment starting or ending here is already accounted for.
    /// Idempotent; does nothing unless kinds were merged.
    pub(crate) fn reconcile(&mut self) {
        if !self.check_duplicates {
            return;
        }
        let from = &self.from;
        let to = &self.to;
        self.interior
            .retain(|segment| !from.contains(segment) && !to.contains(segment));
    }

    /// Total number of role entries; a point is an intersection iff
    /// this exceeds one.
    pub(crate) fn role_count(&self) -> usize {
        self.from.len() + self.to.len() + self.interior.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn at(x: f64, y: f64) -> Coordinate<f64> {
        Coordinate { x, y }
    }

    #[test]
    fn new_node_snaps_the_point() {
        let node = SweepEvent::new(
            NewEvent::Start {
                point: at(1e-12, 2.),
                segment: 0,
            },
            EPS,
        );
        assert_eq!((node.point.x, node.point.y), (0., 2.));
        assert_eq!(node.from.as_slice(), &[0]);
    }

    #[test]
    fn merge_is_role_wise() {
        let mut node = SweepEvent::new(
            NewEvent::Start {
                point: at(1., 1.),
                segment: 0,
            },
            EPS,
        );
        node.merge(NewEvent::Start {
            point: at(1., 1.),
            segment: 1,
        });
        assert!(!node.check_duplicates);

        node.merge(NewEvent::Finish {
            point: at(1., 1.),
            segment: 2,
        });
        assert!(node.check_duplicates);
        assert_eq!(node.from.as_slice(), &[0, 1]);
        assert_eq!(node.to.as_slice(), &[2]);
        assert_eq!(node.role_count(), 3);
    }

    #[test]
    fn interior_merge_deduplicates() {
        let mut node = SweepEvent::new(
            NewEvent::Interior {
                point: at(1., 1.),
                pair: [0, 1],
            },
            EPS,
        );
        node.merge(NewEvent::Interior {
            point: at(1., 1.),
            pair: [1, 2],
        });
        assert_eq!(node.interior.as_slice(), &[0, 1, 2]);
        assert!(!node.check_duplicates);
    }

    #[test]
    fn reconcile_strips_end_point_roles_from_interior() {
        let mut node = SweepEvent::new(
            NewEvent::Finish {
                point: at(1., 1.),
                segment: 0,
            },
            EPS,
        );
        node.merge(NewEvent::Interior {
            point: at(1., 1.),
            pair: [0, 1],
        });
        node.reconcile();
        assert_eq!(node.interior.as_slice(), &[1]);
        assert_eq!(node.to.as_slice(), &[0]);
        // Running it again changes nothing.
        node.reconcile();
        assert_eq!(node.interior.as_slice(), &[1]);
    }
}
