use std::fmt;

use thiserror::Error;

use crate::geom::Coordinate;

/// Robustness or topological-consistency failure during graph construction,
/// depth assignment or ring extraction.
///
/// Fatal for the attempt in which it occurs; the buffer operation retries
/// the whole construction at reduced precision, everything else propagates.
#[derive(Clone, Debug, PartialEq)]
pub struct TopologyError {
    pub msg: String,
    pub coordinate: Option<Coordinate>,
}

impl TopologyError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into(), coordinate: None }
    }

    pub fn at(msg: impl Into<String>, coordinate: Coordinate) -> Self {
        Self { msg: msg.into(), coordinate: Some(coordinate) }
    }
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coordinate {
            Some(c) => write!(f, "{} at or near point {}", self.msg, c),
            None => write!(f, "{}", self.msg),
        }
    }
}

impl std::error::Error for TopologyError {}

/// Structural violation caught at geometry construction time.  Never
/// retried: the caller's input or usage is wrong.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Ring is non-empty and not closed.
    #[error("points must form a closed ring")]
    RingNotClosed,
    /// Ring has 1-3 points.
    #[error("number of ring points must be 0 or >= 4, was {0}")]
    RingTooFewPoints(usize),
    /// LineString with fewer than 2 points.
    #[error("line string must have 0 or >= 2 points, was {0}")]
    LineTooFewPoints(usize),
    /// An ordinate is NaN or infinite.
    #[error("non-finite ordinate in coordinate {0}")]
    NonFiniteCoordinate(Coordinate),
    /// Operation applied to a geometry kind it does not support.
    #[error("unsupported geometry kind: {0}")]
    UnsupportedKind(&'static str),
}

pub type Result<T, E = TopologyError> = std::result::Result<T, E>;
