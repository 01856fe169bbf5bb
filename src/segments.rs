use geo::{GeoFloat, Coordinate, Line};
use slab::Slab;

use crate::error::Error;
use crate::geom::{pseudo_angle, snap_coord};

/// A canonicalized input segment.
///
/// `from` is the upper end point: greater `y`, or smaller `x` when the
/// ys are equal. Near-horizontal segments are flattened to exactly
/// horizontal before the swap so that the event comparator and the
/// sweep status agree on which segments are horizontal. A segment never
/// changes after canonicalization.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Segment<T: GeoFloat> {
    index: usize,
    pub(crate) from: Coordinate<T>,
    pub(crate) to: Coordinate<T>,
    pub(crate) dy: T,
    pub(crate) dx: T,
    pub(crate) angle: T,
}

impl<T: GeoFloat> Segment<T> {
    /// Validate, canonicalize and store a segment; returns its key.
    pub(crate) fn create_in_slab(
        storage: &mut Slab<Self>,
        index: usize,
        line: Line<T>,
        eps: T,
    ) -> Result<usize, Error> {
        let mut from = snap_coord(line.start, eps);
        let mut to = snap_coord(line.end, eps);
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return Err(Error::NonFiniteCoordinate { index });
        }

        if (from.y - to.y).abs() < eps {
            to.y = from.y;
        }
        if from.y < to.y || (from.y == to.y && from.x > to.x) {
            std::mem::swap(&mut from, &mut to);
        }

        let dy = from.y - to.y;
        let dx = from.x - to.x;
        if dy.abs() < eps && dx.abs() < eps {
            return Err(Error::DegenerateSegment { index });
        }

        let entry = storage.vacant_entry();
        let key = entry.key();
        entry.insert(Segment {
            index,
            from,
            to,
            dy,
            dx,
            angle: pseudo_angle(dy, dx),
        });
        Ok(key)
    }

    /// Get the segment's position in the caller's input.
    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub(crate) fn is_horizontal(&self, eps: T) -> bool {
        // dy is non-negative after canonicalization.
        self.dy < eps
    }

    /// The x-coordinate where this segment crosses the sweep line
    /// through `point`.
    ///
    /// A horizontal segment lies along the sweep line; it takes the
    /// sweep point's x, clamped into its span, so that it travels east
    /// together with the sweep.
    pub(crate) fn x_at(&self, point: Coordinate<T>, eps: T) -> T {
        if self.is_horizontal(eps) {
            point.x.max(self.from.x).min(self.to.x)
        } else {
            self.from.x - (self.from.y - point.y) * self.dx / self.dy
        }
    }
}
