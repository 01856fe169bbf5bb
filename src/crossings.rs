use geo::{GeoFloat, Coordinate, Line};

use crate::error::Error;
use crate::sweep::{Options, Sweeper};

/// A reported crossing: a point and every input segment present there.
///
/// Segments sharing the point (within the sweep's epsilon) are merged
/// into a single record, whatever mix of crossings and end-point
/// touches meets there.
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing<T: GeoFloat> {
    /// The intersection point, with near-zero coordinates snapped.
    pub point: Coordinate<T>,
    /// Indices into the caller's segment slice, in increasing order:
    /// the union of the segments crossing through, ending and starting
    /// at the point. With
    /// [`ignore_endpoints`](crate::Options::ignore_endpoints) set, only
    /// the crossing-through segments.
    pub segments: Vec<usize>,
}

/// Compute all crossings among `lines`.
///
/// Validates the input, runs the sweep to completion and returns one
/// record per intersection point, in sweep order (top to bottom, west
/// to east). The record *content* is independent of the input order.
///
/// This is the batch entry point; construct a
/// [`Sweeper`](crate::Sweeper) directly to advance the sweep one event
/// at a time instead.
pub fn find_crossings<T: GeoFloat>(
    lines: &[Line<T>],
    options: Options<T>,
) -> Result<Vec<Crossing<T>>, Error> {
    Ok(Sweeper::new(lines, options)?.run())
}
