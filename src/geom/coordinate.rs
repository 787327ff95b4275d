use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single location on the plane, with an optional elevation.
///
/// All topology algorithms treat coordinates as 2D values: equality,
/// hashing and ordering ignore `z` (which defaults to `NaN` when absent).
/// `Coordinate` is `Copy`; geometries own their coordinate data outright
/// and never alias a shared buffer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: f64::NAN }
    }

    pub const fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Both planar ordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Hash key over the exact bit patterns of x and y.
    pub(crate) fn key(&self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Coordinate {}

impl std::hash::Hash for Coordinate {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    /// Lexicographic (x, y) ordering.
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_z() {
        assert_eq!(Coordinate::new(1.0, 2.0), Coordinate::with_z(1.0, 2.0, 5.0));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Coordinate::new(0.0, 9.0) < Coordinate::new(1.0, 0.0));
        assert!(Coordinate::new(1.0, 0.0) < Coordinate::new(1.0, 1.0));
    }

    #[test]
    fn nan_ordinate_is_not_finite() {
        assert!(!Coordinate::new(f64::NAN, 0.0).is_finite());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_finite());
        assert!(Coordinate::new(0.0, 0.0).is_finite());
    }
}
