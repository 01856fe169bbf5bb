use std::cmp::Ordering;

use geo::{GeoFloat, Coordinate};
use slab::Slab;

use crate::segments::Segment;

/// The segments currently crossing the sweep line, ordered left to
/// right.
///
/// Backed by a gap-free ordered `Vec` of slab keys with binary-searched
/// block location. Between events no two active segments cross, so
/// their x-order at the current sweep line equals the stored order and
/// binary search stays valid; every crossing produces an event that
/// re-orders the segments through its point.
///
/// Segments through the event point have two orderings: the pre-event
/// order (just above the line) and the post-event order (just below),
/// which are reverses of each other for non-horizontal segments.
/// Insertion always applies the below-line order; this is the step
/// that re-orders interior segments across their crossing point.
pub(crate) struct SweepStatus<T: GeoFloat> {
    entries: Vec<usize>,
    eps: T,
}

/// The four segments bounding a (re)inserted contiguous block.
pub(crate) struct Boundary {
    pub(crate) before_left: Option<usize>,
    pub(crate) left: usize,
    pub(crate) right: usize,
    pub(crate) after_right: Option<usize>,
}

impl<T: GeoFloat> SweepStatus<T> {
    pub(crate) fn new(eps: T) -> Self {
        SweepStatus {
            entries: Vec::new(),
            eps,
        }
    }

    /// The active segment keys in left-to-right order.
    pub(crate) fn ordered_keys(&self) -> &[usize] {
        &self.entries
    }

    /// Left/at/right classification of an entry against the event point.
    fn classify(&self, key: usize, point: Coordinate<T>, storage: &Slab<Segment<T>>) -> Ordering {
        let x = storage[key].x_at(point, self.eps);
        if (x - point.x).abs() < self.eps {
            Ordering::Equal
        } else if x < point.x {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Contiguous range of entries whose sweep-line intercept is at the
    /// event point.
    fn at_block(&self, point: Coordinate<T>, storage: &Slab<Segment<T>>) -> (usize, usize) {
        let lo = self
            .entries
            .partition_point(|&key| self.classify(key, point, storage) == Ordering::Less);
        let hi = lo
            + self.entries[lo..]
                .partition_point(|&key| self.classify(key, point, storage) != Ordering::Greater);
        (lo, hi)
    }

    /// Below-line order of two segments through a common point.
    ///
    /// A horizontal segment extends east of the point along the line
    /// itself, so it orders after everything descending from the point;
    /// the rest order by angle. Collinear segments tie.
    fn cmp_below(a: &Segment<T>, b: &Segment<T>, eps: T) -> Ordering {
        match (a.is_horizontal(eps), b.is_horizontal(eps)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.angle.partial_cmp(&b.angle).unwrap_or(Ordering::Equal),
        }
    }

    /// Remove the segments ending and the interior segments crossing at
    /// the event point.
    pub(crate) fn delete_segments(
        &mut self,
        ending: &[usize],
        interior: &[usize],
        point: Coordinate<T>,
        storage: &Slab<Segment<T>>,
    ) {
        let (lo, mut hi) = self.at_block(point, storage);
        let mut missing = ending.len() + interior.len();
        let mut i = lo;
        while i < hi {
            let key = self.entries[i];
            if ending.contains(&key) || interior.contains(&key) {
                self.entries.remove(i);
                hi -= 1;
                missing -= 1;
            } else {
                i += 1;
            }
        }
        if missing > 0 {
            // An intercept drifted past the tolerance; fall back to a
            // full scan so the status stays consistent.
            debug_assert!(false, "active segment not found at its event point");
            self.entries
                .retain(|key| !(ending.contains(key) || interior.contains(key)));
        }
    }

    /// Insert the starting segments and re-insert the interior ones,
    /// ordered for the sweep line just below the event point.
    ///
    /// Entries already at the point (collinear stragglers) are ordered
    /// together with the inserted block.
    pub(crate) fn insert_segments(
        &mut self,
        interior: &[usize],
        starting: &[usize],
        point: Coordinate<T>,
        storage: &Slab<Segment<T>>,
    ) {
        let (lo, hi) = self.at_block(point, storage);
        let mut block: Vec<usize> = self.entries.drain(lo..hi).collect();
        block.extend_from_slice(interior);
        block.extend_from_slice(starting);
        let eps = self.eps;
        block.sort_by(|&a, &b| Self::cmp_below(&storage[a], &storage[b], eps));

        let tail = self.entries.split_off(lo);
        self.entries.extend(block);
        self.entries.extend(tail);
    }

    /// Immediate left/right neighbors of the gap left by a pure
    /// end-point event (nothing starting, nothing crossing).
    pub(crate) fn neighbors_of(
        &self,
        point: Coordinate<T>,
        storage: &Slab<Segment<T>>,
    ) -> (Option<usize>, Option<usize>) {
        let (lo, hi) = self.at_block(point, storage);
        let left = lo.checked_sub(1).map(|i| self.entries[i]);
        (left, self.entries.get(hi).copied())
    }

    /// The four segments bounding the block of starting and interior
    /// segments just inserted at the event point: its outer neighbors
    /// and its own extremes. Only these can gain a new adjacency, so
    /// only they participate in the next intersection probe.
    pub(crate) fn boundary_segments(
        &self,
        starting: &[usize],
        interior: &[usize],
        point: Coordinate<T>,
        storage: &Slab<Segment<T>>,
    ) -> Option<Boundary> {
        let (lo, hi) = self.at_block(point, storage);
        let mut first = None;
        let mut last = None;
        for i in lo..hi {
            let key = self.entries[i];
            if starting.contains(&key) || interior.contains(&key) {
                if first.is_none() {
                    first = Some(i);
                }
                last = Some(i);
            }
        }
        let (first, last) = (first?, last?);
        Some(Boundary {
            before_left: first.checked_sub(1).map(|i| self.entries[i]),
            left: self.entries[first],
            right: self.entries[last],
            after_right: self.entries.get(last + 1).copied(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Line;

    const EPS: f64 = 1e-9;

    fn at(x: f64, y: f64) -> Coordinate<f64> {
        Coordinate { x, y }
    }

    fn fill(lines: &[[(f64, f64); 2]]) -> (Slab<Segment<f64>>, Vec<usize>) {
        let mut slab = Slab::new();
        let keys = lines
            .iter()
            .enumerate()
            .map(|(i, &l)| Segment::create_in_slab(&mut slab, i, Line::from(l), EPS).unwrap())
            .collect();
        (slab, keys)
    }

    #[test]
    fn starting_segments_order_left_to_right() {
        // Two segments starting at the same point, one descending left
        // and one descending right, plus a pre-existing one on each side.
        let (slab, keys) = fill(&[
            [(-5., 1.), (-5., -1.)],
            [(5., 1.), (5., -1.)],
            [(0., 0.), (-1., -2.)],
            [(0., 0.), (1., -2.)],
        ]);
        let mut status = SweepStatus::new(EPS);
        status.insert_segments(&[], &[keys[0]], at(-5., 1.), &slab);
        status.insert_segments(&[], &[keys[1]], at(5., 1.), &slab);
        status.insert_segments(&[], &[keys[3], keys[2]], at(0., 0.), &slab);
        assert_eq!(status.ordered_keys(), &[keys[0], keys[2], keys[3], keys[1]]);
    }

    #[test]
    fn interior_segments_reverse_across_their_crossing() {
        let (slab, keys) = fill(&[[(0., 2.), (2., 0.)], [(2., 2.), (0., 0.)]]);
        let mut status = SweepStatus::new(EPS);
        status.insert_segments(&[], &[keys[0]], at(0., 2.), &slab);
        status.insert_segments(&[], &[keys[1]], at(2., 2.), &slab);
        // Above the crossing the west-starting segment is on the left.
        assert_eq!(status.ordered_keys(), &[keys[0], keys[1]]);

        status.delete_segments(&[], &[keys[0], keys[1]], at(1., 1.), &slab);
        assert!(status.ordered_keys().is_empty());
        status.insert_segments(&[keys[0], keys[1]], &[], at(1., 1.), &slab);
        // Below it the order is reversed.
        assert_eq!(status.ordered_keys(), &[keys[1], keys[0]]);
    }

    #[test]
    fn horizontal_orders_east_of_segments_through_the_point() {
        let (slab, keys) = fill(&[[(0., 0.), (5., 0.)], [(0., 2.), (0., -2.)]]);
        let mut status = SweepStatus::new(EPS);
        status.insert_segments(&[], &[keys[1]], at(0., 2.), &slab);
        status.insert_segments(&[], &[keys[0]], at(0., 0.), &slab);
        assert_eq!(status.ordered_keys(), &[keys[1], keys[0]]);
    }

    #[test]
    fn neighbors_of_a_deleted_gap() {
        let (slab, keys) = fill(&[
            [(-2., 1.), (-2., -1.)],
            [(0., 1.), (0., -1.)],
            [(2., 1.), (2., -1.)],
        ]);
        let mut status = SweepStatus::new(EPS);
        for &key in &keys {
            let from = slab[key].from;
            status.insert_segments(&[], &[key], from, &slab);
        }
        status.delete_segments(&[keys[1]], &[], at(0., -1.), &slab);
        let (left, right) = status.neighbors_of(at(0., -1.), &slab);
        assert_eq!((left, right), (Some(keys[0]), Some(keys[2])));

        let (left, right) = status.neighbors_of(at(-2., -1.), &slab);
        assert_eq!((left, right), (None, Some(keys[0])));
    }

    #[test]
    fn boundary_of_an_inserted_block() {
        let (slab, keys) = fill(&[
            [(-2., 1.), (-2., -1.)],
            [(2., 1.), (2., -1.)],
            [(0., 0.), (-1., -2.)],
            [(0., 0.), (1., -2.)],
        ]);
        let mut status = SweepStatus::new(EPS);
        status.insert_segments(&[], &[keys[0]], at(-2., 1.), &slab);
        status.insert_segments(&[], &[keys[1]], at(2., 1.), &slab);
        status.insert_segments(&[], &[keys[2], keys[3]], at(0., 0.), &slab);

        let b = status
            .boundary_segments(&[keys[2], keys[3]], &[], at(0., 0.), &slab)
            .unwrap();
        assert_eq!(b.before_left, Some(keys[0]));
        assert_eq!(b.left, keys[2]);
        assert_eq!(b.right, keys[3]);
        assert_eq!(b.after_right, Some(keys[1]));
    }

    #[test]
    fn boundary_skips_segments_merely_passing_through() {
        // A segment passes through the point where another starts; it
        // bounds the inserted block from the left.
        let (slab, keys) = fill(&[[(0., 0.), (2., 2.)], [(1., 1.), (5., 1.)]]);
        let mut status = SweepStatus::new(EPS);
        status.insert_segments(&[], &[keys[0]], at(2., 2.), &slab);
        status.insert_segments(&[], &[keys[1]], at(1., 1.), &slab);

        let b = status
            .boundary_segments(&[keys[1]], &[], at(1., 1.), &slab)
            .unwrap();
        assert_eq!(b.before_left, Some(keys[0]));
        assert_eq!(b.left, keys[1]);
        assert_eq!(b.right, keys[1]);
        assert_eq!(b.after_right, None);
    }
}
