//! Planar distance helpers.

use crate::geom::Coordinate;

/// Distance from `p` to the segment `a-b`.
pub fn point_segment_distance(p: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return p.distance(&a);
    }
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    let r = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len2;
    if r <= 0.0 {
        return p.distance(&a);
    }
    if r >= 1.0 {
        return p.distance(&b);
    }
    // Perpendicular distance to the supporting line.
    let s = ((a.y - p.y) * dx - (a.x - p.x) * dy) / len2;
    s.abs() * len2.sqrt()
}

/// Distance between segments `a1-a2` and `b1-b2`; zero if they intersect.
pub fn segment_segment_distance(
    a1: Coordinate,
    a2: Coordinate,
    b1: Coordinate,
    b2: Coordinate,
) -> f64 {
    use super::predicates::orientation;
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);
    if o1 != o2 && o3 != o4 && (o1 != 0 || o2 != 0) && (o3 != 0 || o4 != 0) {
        return 0.0;
    }
    let mut d = point_segment_distance(b1, a1, a2);
    d = d.min(point_segment_distance(b2, a1, a2));
    d = d.min(point_segment_distance(a1, b1, b2));
    d.min(point_segment_distance(a2, b1, b2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn point_to_segment_interior() {
        let d = point_segment_distance(c(5.0, 3.0), c(0.0, 0.0), c(10.0, 0.0));
        assert_relative_eq!(d, 3.0);
    }

    #[test]
    fn point_to_segment_past_endpoint() {
        let d = point_segment_distance(c(13.0, 4.0), c(0.0, 0.0), c(10.0, 0.0));
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn degenerate_segment_is_a_point() {
        let d = point_segment_distance(c(3.0, 4.0), c(0.0, 0.0), c(0.0, 0.0));
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn crossing_segments_have_zero_distance() {
        let d = segment_segment_distance(c(0.0, 0.0), c(10.0, 10.0), c(0.0, 10.0), c(10.0, 0.0));
        assert_relative_eq!(d, 0.0);
    }

    #[test]
    fn parallel_segments() {
        let d = segment_segment_distance(c(0.0, 0.0), c(10.0, 0.0), c(0.0, 2.0), c(10.0, 2.0));
        assert_relative_eq!(d, 2.0);
    }
}
