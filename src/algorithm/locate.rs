//! Point location against geometries.

use crate::geom::{Coordinate, Geometry, Location, Polygon};

use super::predicates::{on_segment, point_in_ring};

/// Locate `pt` relative to a single ring: on the boundary, inside, or
/// outside.
pub fn locate_in_ring(pt: Coordinate, ring: &[Coordinate]) -> Location {
    for w in ring.windows(2) {
        if on_segment(pt, w[0], w[1]) {
            return Location::Boundary;
        }
    }
    if point_in_ring(pt, ring) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Locate `pt` relative to a polygon with holes.
pub fn locate_in_polygon(pt: Coordinate, poly: &Polygon) -> Location {
    if poly.is_empty() {
        return Location::Exterior;
    }
    match locate_in_ring(pt, poly.shell.coords().as_slice()) {
        Location::Exterior => return Location::Exterior,
        Location::Boundary => return Location::Boundary,
        _ => {}
    }
    for hole in &poly.holes {
        match locate_in_ring(pt, hole.coords().as_slice()) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            _ => {}
        }
    }
    Location::Interior
}

/// Locate a point relative to any geometry.
///
/// Areal components contribute interior and boundary as usual.  For line
/// components the mod-2 rule applies: an endpoint shared by an odd number
/// of line ends is boundary, otherwise any on-line point is interior.
pub fn locate(pt: Coordinate, geom: &Geometry) -> Location {
    // Areal components take precedence.
    for poly in geom.polygons() {
        match locate_in_polygon(pt, poly) {
            Location::Exterior => {}
            loc => return loc,
        }
    }

    let mut endpoint_hits = 0usize;
    let mut on_interior = false;
    for line in geom.lines() {
        let coords = line.as_slice();
        if coords.is_empty() {
            continue;
        }
        let closed = line.is_closed();
        if !closed {
            if pt == coords[0] {
                endpoint_hits += 1;
            }
            if pt == coords[coords.len() - 1] {
                endpoint_hits += 1;
            }
        }
        for w in coords.windows(2) {
            if on_segment(pt, w[0], w[1])
                && (closed || (pt != coords[0] && pt != coords[coords.len() - 1]))
            {
                on_interior = true;
            }
        }
    }
    if endpoint_hits % 2 == 1 {
        return Location::Boundary;
    }
    if endpoint_hits > 0 || on_interior {
        return Location::Interior;
    }

    match geom {
        Geometry::Point(c) if *c == pt => Location::Interior,
        Geometry::MultiPoint(cs) if cs.contains(&pt) => Location::Interior,
        Geometry::Collection(parts) => {
            let mut best = Location::Exterior;
            for part in parts {
                match locate(pt, part) {
                    Location::Exterior => {}
                    loc => {
                        best = loc;
                        break;
                    }
                }
            }
            best
        }
        _ => Location::Exterior,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::GeometryFactory;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn square_with_hole() -> Polygon {
        let f = GeometryFactory::floating();
        let shell = f
            .linear_ring(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
            .unwrap();
        let hole = f
            .linear_ring(vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0), (4.0, 4.0)])
            .unwrap();
        Polygon::new(shell, vec![hole])
    }

    #[test]
    fn polygon_locations() {
        let poly = square_with_hole();
        assert_eq!(locate_in_polygon(c(2.0, 2.0), &poly), Location::Interior);
        assert_eq!(locate_in_polygon(c(5.0, 5.0), &poly), Location::Exterior);
        assert_eq!(locate_in_polygon(c(0.0, 5.0), &poly), Location::Boundary);
        assert_eq!(locate_in_polygon(c(4.0, 5.0), &poly), Location::Boundary);
        assert_eq!(locate_in_polygon(c(-1.0, 5.0), &poly), Location::Exterior);
    }

    #[test]
    fn line_endpoint_is_boundary() {
        let f = GeometryFactory::floating();
        let g = f.line_string(vec![(0.0, 0.0), (10.0, 0.0)]).unwrap();
        assert_eq!(locate(c(0.0, 0.0), &g), Location::Boundary);
        assert_eq!(locate(c(5.0, 0.0), &g), Location::Interior);
        assert_eq!(locate(c(5.0, 1.0), &g), Location::Exterior);
    }

    #[test]
    fn shared_endpoint_of_two_lines_is_interior() {
        let f = GeometryFactory::floating();
        let g = f
            .multi_line_string(vec![
                vec![(0.0, 0.0), (5.0, 0.0)].into(),
                vec![(5.0, 0.0), (10.0, 0.0)].into(),
            ])
            .unwrap();
        assert_eq!(locate(c(5.0, 0.0), &g), Location::Interior);
    }

    #[test]
    fn point_geometry() {
        let g = Geometry::Point(c(3.0, 4.0));
        assert_eq!(locate(c(3.0, 4.0), &g), Location::Interior);
        assert_eq!(locate(c(3.0, 5.0), &g), Location::Exterior);
    }
}
