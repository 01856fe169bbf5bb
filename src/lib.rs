//! Computes all pairwise crossings of a set of line segments.
//!
//! This is an implementation of the [Bentley-Ottman] algorithm to
//! efficiently compute all intersections of a collection of line
//! segments. The simplest usage is [`find_crossings`], which runs the
//! sweep to completion and returns one [`Crossing`] record per
//! intersection point. This is essentially a drop-in replacement for
//! testing all pairs with [`line_intersection`], but runs in
//! O((n + k) log(n)) time, which is faster than the brute-force search
//! when the number of crossings k is small compared to n^2.
//!
//! For synchronized external consumption (stepping debuggers,
//! visualization layers), construct a [`Sweeper`] and advance it one
//! event per call with [`Sweeper::step`], inspecting the active
//! segments and the accumulated results between steps.
//!
//! # Usage
//!
//! ```rust
//! use geo::Line;
//! use segment_crossings::{find_crossings, Options};
//!
//! let input = vec![
//!     Line::from([(0., 0.), (2., 2.)]),
//!     Line::from([(0., 2.), (2., 0.)]),
//! ];
//! let crossings = find_crossings(&input, Options::default()).unwrap();
//! assert_eq!(crossings.len(), 1);
//! assert_eq!(crossings[0].segments, vec![0, 1]);
//! ```
//!
//! Segments meeting at a point (within the configured epsilon) produce
//! a single record listing every participant, whatever mix of
//! crossings and end-point touches meets there. Collinear overlapping
//! segments are reported only at shared end points, never along the
//! shared range.
//!
//! [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
//! [`line_intersection`]: geo::algorithm::line_intersection::line_intersection

mod active;
mod error;
mod events;
mod geom;
mod queue;
mod segments;

pub mod crossings;
pub use crossings::{find_crossings, Crossing};

pub mod sweep;
pub use sweep::{Options, Step, Sweeper, DEFAULT_EPS};

pub use error::Error;
pub use geom::pseudo_angle;

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
