use geo::{GeoFloat, Coordinate, Line};
use log::{debug, trace};
use slab::Slab;

use crate::active::SweepStatus;
use crate::crossings::Crossing;
use crate::error::Error;
use crate::events::{NewEvent, SweepEvent};
use crate::geom::segment_intersection;
use crate::queue::EventQueue;
use crate::segments::Segment;

/// Default tolerance for coordinate snapping and comparator equality.
pub const DEFAULT_EPS: f64 = 1e-9;

/// Configuration for a sweep.
#[derive(Debug, Clone)]
pub struct Options<T: GeoFloat> {
    /// Suppress records whose only relationship is segments sharing an
    /// end point, with no segment crossing through the point.
    pub ignore_endpoints: bool,
    /// Tolerance below which coordinate differences are treated as
    /// zero. Carried per instance; sweeps with different tolerances can
    /// coexist.
    pub eps: T,
    /// List the crossings are appended into.
    pub results: Vec<Crossing<T>>,
}

impl<T: GeoFloat> Default for Options<T> {
    fn default() -> Self {
        Options {
            ignore_endpoints: false,
            eps: T::from(DEFAULT_EPS).unwrap(),
            results: Vec::new(),
        }
    }
}

/// Outcome of advancing the sweep by one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T: GeoFloat> {
    /// One event was processed. `reported` is set if the point was an
    /// intersection (more than one segment present), whether or not the
    /// configuration let it produce a record.
    Event { point: Coordinate<T>, reported: bool },
    /// The queue is empty; the sweep is complete.
    Done,
}

/// Bentley-Ottman sweep over a set of line segments.
///
/// Owns the event queue, the sweep status and the result list. Run it
/// to completion with [`run`](Sweeper::run) (see also
/// [`find_crossings`](crate::find_crossings)), or advance it one event
/// per call with [`step`](Sweeper::step) for synchronized external
/// consumption, inspecting [`results`](Sweeper::results),
/// [`active_segments`](Sweeper::active_segments) and
/// [`pending_events`](Sweeper::pending_events) between steps.
///
/// The `Iterator` implementation yields the point of each processed
/// event in sweep order.
pub struct Sweeper<T: GeoFloat> {
    segments: Slab<Segment<T>>,
    queue: EventQueue<T>,
    status: SweepStatus<T>,
    results: Vec<Crossing<T>>,
    ignore_endpoints: bool,
    eps: T,
}

impl<T: GeoFloat> Sweeper<T> {
    /// Validate the input and seed the queue with the two end-point
    /// events of every segment. Fails fast: an invalid segment
    /// produces no partial results.
    pub fn new(lines: &[Line<T>], options: Options<T>) -> Result<Self, Error> {
        let Options {
            ignore_endpoints,
            eps,
            results,
        } = options;

        let mut segments = Slab::with_capacity(lines.len());
        let mut queue = EventQueue::new(eps);
        for (index, line) in lines.iter().enumerate() {
            let key = Segment::create_in_slab(&mut segments, index, *line, eps)?;
            let (from, to) = (segments[key].from, segments[key].to);
            queue.push(NewEvent::Start {
                point: from,
                segment: key,
            });
            queue.push(NewEvent::Finish {
                point: to,
                segment: key,
            });
        }

        Ok(Sweeper {
            segments,
            queue,
            status: SweepStatus::new(eps),
            results,
            ignore_endpoints,
            eps,
        })
    }

    /// Pop and handle exactly one event.
    pub fn step(&mut self) -> Step<T> {
        match self.queue.pop() {
            Some(event) => {
                let point = event.point;
                let reported = self.handle_event(event);
                Step::Event { point, reported }
            }
            None => Step::Done,
        }
    }

    /// Run the sweep to completion and return the accumulated
    /// crossings.
    pub fn run(mut self) -> Vec<Crossing<T>> {
        while let Some(event) = self.queue.pop() {
            self.handle_event(event);
        }
        self.results
    }

    /// The crossings reported so far.
    pub fn results(&self) -> &[Crossing<T>] {
        &self.results
    }

    /// Input indices of the currently active segments, left to right.
    pub fn active_segments(&self) -> Vec<usize> {
        self.status
            .ordered_keys()
            .iter()
            .map(|&key| self.segments[key].index())
            .collect()
    }

    /// Number of events still queued.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    fn handle_event(&mut self, mut event: SweepEvent<T>) -> bool {
        trace!("handling event at {:?}", event.point);

        // A merge of different event kinds can leave a segment in both
        // an end-point role and the interior role; end-point roles win.
        event.reconcile();

        let reported = event.role_count() > 1;
        if reported {
            event.is_reported = true;
            self.report(&event);
        }

        let SweepEvent {
            point,
            from: upper,
            to: lower,
            interior,
            ..
        } = event;

        self.status
            .delete_segments(&lower, &interior, point, &self.segments);
        self.status
            .insert_segments(&interior, &upper, point, &self.segments);

        if upper.is_empty() && interior.is_empty() {
            // Nothing was inserted; the deletion gap exposes one new
            // adjacency.
            let (left, right) = self.status.neighbors_of(point, &self.segments);
            self.find_new_event(left, right, point);
        } else if let Some(b) = self
            .status
            .boundary_segments(&upper, &interior, point, &self.segments)
        {
            self.find_new_event(b.before_left, Some(b.left), point);
            self.find_new_event(Some(b.right), b.after_right, point);
        }

        reported
    }

    fn report(&mut self, event: &SweepEvent<T>) {
        let mut segments: Vec<usize> = if self.ignore_endpoints {
            if event.interior.is_empty() {
                return;
            }
            event
                .interior
                .iter()
                .map(|&key| self.segments[key].index())
                .collect()
        } else {
            event
                .interior
                .iter()
                .chain(&event.to)
                .chain(&event.from)
                .map(|&key| self.segments[key].index())
                .collect()
        };
        segments.sort_unstable();
        debug!("crossing at {:?}: segments {:?}", event.point, segments);
        self.results.push(Crossing {
            point: event.point,
            segments,
        });
    }

    /// Probe a pair of newly adjacent segments for a future
    /// intersection and queue it.
    fn find_new_event(&mut self, left: Option<usize>, right: Option<usize>, point: Coordinate<T>) {
        let (left, right) = match (left, right) {
            (Some(left), Some(right)) => (left, right),
            _ => return,
        };

        let (a, b) = (&self.segments[left], &self.segments[right]);
        let intersection = match segment_intersection(a.from, a.to, b.from, b.to, self.eps) {
            Some(p) => p,
            None => return,
        };

        // Strictly above the sweep position means the crossing was
        // already swept past and handled.
        if point.y - intersection.y < -self.eps {
            return;
        }

        debug!(
            "found intersection:\n\tsegment1: {:?}\n\tsegment2: {:?}\n\tintersection: {:?}",
            a, b, intersection
        );
        self.queue.push(NewEvent::Interior {
            point: intersection,
            pair: [left, right],
        });
    }
}

/// Yields the point of each processed event, in sweep order.
impl<T: GeoFloat> Iterator for Sweeper<T> {
    type Item = Coordinate<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Step::Event { point, .. } => Some(point),
            Step::Done => None,
        }
    }
}
