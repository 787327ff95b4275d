//! Topological labels for graph edges.

use crate::geom::Location;

/// The three positions an edge has relative to the regions around it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    On,
    Left,
    Right,
}

/// Locations of the regions on and to either side of an edge, relative to
/// the area the edge was generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Label {
    pub on: Location,
    pub left: Location,
    pub right: Location,
}

impl Label {
    pub fn new(on: Location, left: Location, right: Location) -> Self {
        Self { on, left, right }
    }

    /// Label of a curve bounding an area that lies to its right.
    pub fn area_boundary() -> Self {
        Self::new(Location::Boundary, Location::Exterior, Location::Interior)
    }

    pub fn get(&self, pos: Position) -> Location {
        match pos {
            Position::On => self.on,
            Position::Left => self.left,
            Position::Right => self.right,
        }
    }

    /// Swap the side locations, as seen when traversing the edge backwards.
    pub fn flipped(&self) -> Self {
        Self { on: self.on, left: self.right, right: self.left }
    }

    /// Depth change from left to right: +1 when only the right side is
    /// interior, -1 when only the left is, 0 when the sides agree.
    pub fn depth_delta(&self) -> i32 {
        let d = |loc: Location| i32::from(loc == Location::Interior);
        d(self.right) - d(self.left)
    }
}
