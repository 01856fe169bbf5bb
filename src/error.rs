use std::fmt;

/// Input validation failure.
///
/// Validation happens up-front, before any event enters the queue: a
/// failing input produces no partial results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The segment's end points coincide (within the configured epsilon).
    ///
    /// Zero-length segments have no direction and therefore no position
    /// in the sweep ordering; they must be filtered out by the caller.
    DegenerateSegment { index: usize },
    /// A coordinate of the segment is NaN or infinite.
    NonFiniteCoordinate { index: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DegenerateSegment { index } => {
                write!(f, "segment {} has zero length", index)
            }
            Error::NonFiniteCoordinate { index } => {
                write!(f, "segment {} has a non-finite coordinate", index)
            }
        }
    }
}

impl std::error::Error for Error {}
