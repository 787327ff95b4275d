use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A rule for snapping continuous coordinates to a grid.
///
/// `Floating` keeps full double precision; `Fixed { scale }` rounds each
/// ordinate to the nearest multiple of `1 / scale`.  Reducing precision
/// through a fixed model is how the buffer operation regains robustness
/// after a topology failure.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PrecisionModel {
    Floating,
    Fixed { scale: f64 },
}

impl PrecisionModel {
    pub fn fixed(scale: f64) -> Self {
        assert!(scale > 0.0, "precision scale must be positive");
        Self::Fixed { scale }
    }

    pub fn scale(&self) -> Option<f64> {
        match self {
            Self::Floating => None,
            Self::Fixed { scale } => Some(*scale),
        }
    }

    /// Snap a single ordinate to the grid (round half away from zero).
    pub fn make_precise_ordinate(&self, v: f64) -> f64 {
        match self {
            Self::Floating => v,
            Self::Fixed { scale } => (v * scale).round() / scale,
        }
    }

    /// Snap a coordinate to the grid.  The z ordinate is left untouched.
    pub fn make_precise(&self, c: Coordinate) -> Coordinate {
        match self {
            Self::Floating => c,
            Self::Fixed { .. } => Coordinate {
                x: self.make_precise_ordinate(c.x),
                y: self.make_precise_ordinate(c.y),
                z: c.z,
            },
        }
    }
}

impl Default for PrecisionModel {
    fn default() -> Self {
        Self::Floating
    }
}
