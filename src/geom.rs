use geo::{GeoFloat, Coordinate};

/// Snap a value within `eps` of zero to exactly zero.
///
/// Floating point noise around the origin would otherwise produce
/// spuriously distinct event points.
#[inline]
pub(crate) fn snap<T: GeoFloat>(value: T, eps: T) -> T {
    if value.abs() < eps {
        T::zero()
    } else {
        value
    }
}

/// Snap both coordinates of a point (see [`snap`]).
#[inline]
pub(crate) fn snap_coord<T: GeoFloat>(c: Coordinate<T>, eps: T) -> Coordinate<T> {
    Coordinate {
        x: snap(c.x, eps),
        y: snap(c.y, eps),
    }
}

/// A strictly monotonic substitute for `atan2(dy, dx)`.
///
/// Increases with the true angle as the direction turns
/// counterclockwise from due west, without a trigonometric call. Only
/// the relative order of the returned values is meaningful; the sweep
/// uses it to order segments around a shared point. The zero direction
/// is not in its domain.
pub fn pseudo_angle<T: GeoFloat>(dy: T, dx: T) -> T {
    let p = dx / (dx.abs() + dy.abs());
    if dy > T::zero() {
        (T::one() + T::one()) - p
    } else {
        p
    }
}

/// Intersection of two segments, or `None` if their carrier lines are
/// parallel (determinant within `eps` of zero) or the computed point
/// falls outside either segment's extent.
///
/// Collinear configurations fall under the parallel case: overlapping
/// collinear segments yield no intersection point here. Shared end
/// points of such segments are still reported by the sweep, through
/// event merging. Near-zero coordinates of the result are snapped.
pub(crate) fn segment_intersection<T: GeoFloat>(
    a_from: Coordinate<T>,
    a_to: Coordinate<T>,
    b_from: Coordinate<T>,
    b_to: Coordinate<T>,
    eps: T,
) -> Option<Coordinate<T>> {
    let div = (b_to.y - b_from.y) * (a_to.x - a_from.x) - (b_to.x - b_from.x) * (a_to.y - a_from.y);
    if div.abs() < eps {
        return None;
    }

    let ua = ((b_to.x - b_from.x) * (a_from.y - b_from.y)
        - (b_to.y - b_from.y) * (a_from.x - b_from.x))
        / div;
    let ub = ((a_to.x - a_from.x) * (a_from.y - b_from.y)
        - (a_to.y - a_from.y) * (a_from.x - b_from.x))
        / div;

    let (zero, one) = (T::zero(), T::one());
    if ua < zero || ua > one || ub < zero || ub > one {
        return None;
    }

    Some(snap_coord(
        Coordinate {
            x: a_from.x + ua * (a_to.x - a_from.x),
            y: a_from.y + ua * (a_to.y - a_from.y),
        },
        eps,
    ))
}
