//! Quadrant-based direction comparison for directed edges.
//!
//! Directions are ordered counter-clockwise starting from the positive
//! x-axis.  Comparing quadrants first means the (expensive, robust)
//! orientation test only runs for directions in the same quadrant.

use std::cmp::Ordering;

use geo::Coord;

/// Quadrant of the direction vector `(dx, dy)`, counter-clockwise from the
/// positive x-axis: `0` = NE, `1` = NW, `2` = SW, `3` = SE.
///
/// A zero vector is not a direction; callers must not pass `dx == dy == 0`.
pub fn quadrant(dx: f64, dy: f64) -> u8 {
    debug_assert!(dx != 0.0 || dy != 0.0, "zero-length direction vector");
    if dx >= 0.0 {
        if dy >= 0.0 { 0 } else { 3 }
    } else if dy >= 0.0 {
        1
    } else {
        2
    }
}

/// Compare two directions leaving the common origin `o`, by counter-clockwise
/// angle from the positive x-axis.
///
/// `a` and `b` are direction points (the first coordinate after `o` along
/// each edge).  Uses a robust orientation test to break same-quadrant ties,
/// so near-collinear directions order consistently.
pub fn compare_direction(o: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let qa = quadrant(a.x - o.x, a.y - o.y);
    let qb = quadrant(b.x - o.x, b.y - o.y);
    if qa != qb {
        return qa.cmp(&qb);
    }
    // Same quadrant: a sorts after b iff a is counter-clockwise of b.
    let orient = robust::orient2d(
        robust::Coord { x: o.x, y: o.y },
        robust::Coord { x: b.x, y: b.y },
        robust::Coord { x: a.x, y: a.y },
    );
    if orient > 0.0 {
        Ordering::Greater
    } else if orient < 0.0 {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}
