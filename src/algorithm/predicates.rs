//! Fundamental geometric predicates, built on exact (adaptive-precision)
//! determinant signs so that near-collinear cases never flip.

use crate::geom::Coordinate;

fn rc(c: Coordinate) -> robust::Coord<f64> {
    robust::Coord { x: c.x, y: c.y }
}

/// Exact sign of the 2x2 determinant `| x1 y1 ; x2 y2 |`.
pub fn sign_of_det2x2(x1: f64, y1: f64, x2: f64, y2: f64) -> i32 {
    let d = robust::orient2d(
        robust::Coord { x: 0.0, y: 0.0 },
        robust::Coord { x: x1, y: y1 },
        robust::Coord { x: x2, y: y2 },
    );
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

/// Orientation of `q` relative to the directed line `p1 -> p2`:
/// `1` counter-clockwise (left), `-1` clockwise (right), `0` collinear.
pub fn orientation(p1: Coordinate, p2: Coordinate, q: Coordinate) -> i32 {
    let d = robust::orient2d(rc(p1), rc(p2), rc(q));
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

/// Non-robust orientation using a plain cross product.  Kept for testing
/// the robust predicates against; do not use in topology construction.
pub fn orientation_non_robust(p1: Coordinate, p2: Coordinate, q: Coordinate) -> i32 {
    let det = (p2.x - p1.x) * (q.y - p2.y) - (q.x - p2.x) * (p2.y - p1.y);
    if det > 0.0 {
        1
    } else if det < 0.0 {
        -1
    } else {
        0
    }
}

/// Whether a closed ring is oriented counter-clockwise.
///
/// Uses the orientation at the highest vertex, so it tolerates repeated
/// points.  Degenerate rings (fewer than 3 distinct points) return `false`.
pub fn is_ccw(ring: &[Coordinate]) -> bool {
    // Number of points without the closing endpoint.
    if ring.len() < 4 {
        return false;
    }
    let n = ring.len() - 1;

    // Find the highest point.
    let mut hii = 0;
    for i in 1..=n {
        if ring[i].y > ring[hii].y {
            hii = i;
        }
    }

    // Previous distinct point.
    let mut i_prev = hii;
    loop {
        i_prev = (i_prev + n - 1) % n;
        if ring[i_prev] != ring[hii] || i_prev == hii {
            break;
        }
    }
    // Next distinct point.
    let mut i_next = hii;
    loop {
        i_next = (i_next + 1) % n;
        if ring[i_next] != ring[hii] || i_next == hii {
            break;
        }
    }

    let prev = ring[i_prev];
    let next = ring[i_next];
    if prev == ring[hii] || next == ring[hii] || prev == next {
        // Degenerate: fewer than 3 distinct points.
        return false;
    }

    let disc = orientation(prev, ring[hii], next);
    if disc == 0 {
        // Collinear top: CCW if the previous x is larger than the next x.
        prev.x > next.x
    } else {
        disc > 0
    }
}

/// Brute-force ray-crossing test: is `p` strictly inside `ring`?
///
/// Casts a ray in the +x direction and counts strictly-positive crossings,
/// using the exact determinant sign for each crossing decision.  Points on
/// the boundary may report either way; use an explicit boundary test first
/// when the distinction matters.
pub fn point_in_ring(p: Coordinate, ring: &[Coordinate]) -> bool {
    let mut crossings = 0;
    for i in 1..ring.len() {
        let p1 = ring[i];
        let p2 = ring[i - 1];
        if segment_crosses_positive_ray(p, p1, p2) {
            crossings += 1;
        }
    }
    crossings % 2 == 1
}

/// True if segment `(p1, p2)` crosses the ray from `p` in the +x direction
/// at a strictly positive x offset.
pub(crate) fn segment_crosses_positive_ray(
    p: Coordinate,
    p1: Coordinate,
    p2: Coordinate,
) -> bool {
    let x1 = p1.x - p.x;
    let y1 = p1.y - p.y;
    let x2 = p2.x - p.x;
    let y2 = p2.y - p.y;
    if (y1 > 0.0 && y2 <= 0.0) || (y2 > 0.0 && y1 <= 0.0) {
        // Segment straddles the x axis; the ray is crossed iff the
        // x-intersection det/(y2 - y1) is strictly positive.
        let sign = sign_of_det2x2(x1, y1, x2, y2);
        if sign == 0 {
            return false;
        }
        let denom_positive = y2 - y1 > 0.0;
        (sign > 0) == denom_positive
    } else {
        false
    }
}

/// Is `p` on the closed segment `a -> b`?
pub fn on_segment(p: Coordinate, a: Coordinate, b: Coordinate) -> bool {
    if orientation(a, b, p) != 0 {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
