//! Geometry validity checking.
//!
//! Reports the first violation found, as a kind plus the coordinate where
//! it was detected.  Checks run cheapest-first within each component:
//! coordinates, ring closure, point counts, then ring intersections, then
//! containment between rings.

use std::fmt;

use ahash::AHashSet;

use crate::algorithm::{locate_in_polygon, locate_in_ring, IntersectionKind, LineIntersector};
use crate::geom::{Coordinate, Geometry, LineString, LinearRing, Location, Polygon};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationErrorKind {
    HoleOutsideShell,
    NestedHoles,
    DisconnectedInterior,
    SelfIntersection,
    RingSelfIntersection,
    NestedShells,
    DuplicateRings,
    TooFewPoints,
    InvalidCoordinate,
    RingNotClosed,
}

impl ValidationErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationErrorKind::HoleOutsideShell => "Hole lies outside shell",
            ValidationErrorKind::NestedHoles => "Holes are nested",
            ValidationErrorKind::DisconnectedInterior => "Interior is disconnected",
            ValidationErrorKind::SelfIntersection => "Self-intersection",
            ValidationErrorKind::RingSelfIntersection => "Ring self-intersection",
            ValidationErrorKind::NestedShells => "Nested shells",
            ValidationErrorKind::DuplicateRings => "Duplicate Rings",
            ValidationErrorKind::TooFewPoints => {
                "Too few distinct points in geometry component"
            }
            ValidationErrorKind::InvalidCoordinate => "Invalid Coordinate",
            ValidationErrorKind::RingNotClosed => "Ring is not closed",
        }
    }
}

/// A validity violation and the coordinate where it was detected.
#[derive(Clone, Debug, PartialEq)]
pub struct TopologyValidationError {
    pub kind: ValidationErrorKind,
    pub coordinate: Option<Coordinate>,
}

impl TopologyValidationError {
    fn at(kind: ValidationErrorKind, coordinate: Coordinate) -> Self {
        Self { kind, coordinate: Some(coordinate) }
    }
}

impl fmt::Display for TopologyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coordinate {
            Some(c) => write!(f, "{} at or near point {}", self.kind.message(), c),
            None => write!(f, "{}", self.kind.message()),
        }
    }
}

impl std::error::Error for TopologyValidationError {}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

pub fn is_valid(geom: &Geometry) -> bool {
    check_valid(geom).is_none()
}

/// Return the first validity violation of `geom`, or `None` if it is valid.
pub fn check_valid(geom: &Geometry) -> Option<TopologyValidationError> {
    match geom {
        Geometry::Point(c) => check_coord(*c),
        Geometry::MultiPoint(cs) => cs.iter().find_map(|&c| check_coord(c)),
        Geometry::LineString(l) => check_line(l),
        Geometry::LinearRing(r) => check_ring(r),
        Geometry::Polygon(p) => check_polygon(p),
        Geometry::MultiLineString(ls) => ls.iter().find_map(check_line),
        Geometry::MultiPolygon(ps) => check_multi_polygon(ps),
        Geometry::Collection(gs) => gs.iter().find_map(check_valid),
    }
}

// ---------------------------------------------------------------------------
// Per-component checks
// ---------------------------------------------------------------------------

fn check_coord(c: Coordinate) -> Option<TopologyValidationError> {
    if c.is_finite() {
        None
    } else {
        Some(TopologyValidationError::at(ValidationErrorKind::InvalidCoordinate, c))
    }
}

fn check_line(line: &LineString) -> Option<TopologyValidationError> {
    let coords = line.coords().as_slice();
    if let Some(e) = coords.iter().find_map(|&c| check_coord(c)) {
        return Some(e);
    }
    if !coords.is_empty() && distinct_count(coords) < 2 {
        return Some(TopologyValidationError::at(
            ValidationErrorKind::TooFewPoints,
            coords[0],
        ));
    }
    None
}

fn check_ring(ring: &LinearRing) -> Option<TopologyValidationError> {
    let coords = ring.coords().as_slice();
    if coords.is_empty() {
        return None;
    }
    if let Some(e) = coords.iter().find_map(|&c| check_coord(c)) {
        return Some(e);
    }
    if coords.first() != coords.last() {
        return Some(TopologyValidationError::at(
            ValidationErrorKind::RingNotClosed,
            coords[0],
        ));
    }
    if distinct_count(coords) < 3 {
        return Some(TopologyValidationError::at(
            ValidationErrorKind::TooFewPoints,
            coords[0],
        ));
    }
    ring_self_intersection(coords).map(|c| {
        TopologyValidationError::at(ValidationErrorKind::RingSelfIntersection, c)
    })
}

fn check_polygon(poly: &Polygon) -> Option<TopologyValidationError> {
    if poly.is_empty() {
        return None;
    }
    for ring in poly.rings() {
        if let Some(e) = check_ring(ring) {
            return Some(e);
        }
    }

    let rings: Vec<&[Coordinate]> = poly
        .rings()
        .filter(|r| !r.is_empty())
        .map(|r| r.coords().as_slice())
        .collect();

    // Ring pairs: crossings are fatal, touch points feed the interior
    // connectedness check.
    let mut touches: Vec<(usize, usize, Vec<Coordinate>)> = Vec::new();
    for a in 0..rings.len() {
        for b in (a + 1)..rings.len() {
            if same_vertex_set(rings[a], rings[b]) {
                return Some(TopologyValidationError::at(
                    ValidationErrorKind::DuplicateRings,
                    rings[b][0],
                ));
            }
            match ring_pair_relation(rings[a], rings[b]) {
                PairRelation::Crossing(c) => {
                    return Some(TopologyValidationError::at(
                        ValidationErrorKind::SelfIntersection,
                        c,
                    ));
                }
                PairRelation::Touching(pts) if !pts.is_empty() => {
                    touches.push((a, b, pts));
                }
                PairRelation::Touching(_) => {}
            }
        }
    }

    let shell = rings[0];
    for hole in &rings[1..] {
        if let Some(pt) = vertex_not_on(hole, shell) {
            if locate_in_ring(pt, shell) == Location::Exterior {
                return Some(TopologyValidationError::at(
                    ValidationErrorKind::HoleOutsideShell,
                    pt,
                ));
            }
        }
    }
    for a in 1..rings.len() {
        for b in 1..rings.len() {
            if a == b {
                continue;
            }
            if let Some(pt) = vertex_not_on(rings[a], rings[b]) {
                if locate_in_ring(pt, rings[b]) == Location::Interior {
                    return Some(TopologyValidationError::at(
                        ValidationErrorKind::NestedHoles,
                        pt,
                    ));
                }
            }
        }
    }

    // The interior stays connected iff no ring pair touches twice and the
    // touch graph over the rings is acyclic.
    let mut parent: Vec<usize> = (0..rings.len()).collect();
    for (a, b, pts) in touches {
        if pts.len() >= 2 {
            return Some(TopologyValidationError::at(
                ValidationErrorKind::DisconnectedInterior,
                pts[1],
            ));
        }
        let (ra, rb) = (find_root(&mut parent, a), find_root(&mut parent, b));
        if ra == rb {
            return Some(TopologyValidationError::at(
                ValidationErrorKind::DisconnectedInterior,
                pts[0],
            ));
        }
        parent[ra] = rb;
    }
    None
}

fn check_multi_polygon(polys: &[Polygon]) -> Option<TopologyValidationError> {
    for p in polys {
        if let Some(e) = check_polygon(p) {
            return Some(e);
        }
    }
    for a in 0..polys.len() {
        for b in 0..polys.len() {
            if a == b || polys[a].is_empty() || polys[b].is_empty() {
                continue;
            }
            if a < b {
                let sa = polys[a].shell.coords().as_slice();
                let sb = polys[b].shell.coords().as_slice();
                if let PairRelation::Crossing(c) = ring_pair_relation(sa, sb) {
                    return Some(TopologyValidationError::at(
                        ValidationErrorKind::SelfIntersection,
                        c,
                    ));
                }
            }
            if let Some(e) = shell_nested_in(&polys[a], &polys[b]) {
                return Some(e);
            }
        }
    }
    None
}

/// Flag `a`'s shell if it sits inside `b`'s shell without being tucked into
/// one of `b`'s holes.
fn shell_nested_in(a: &Polygon, b: &Polygon) -> Option<TopologyValidationError> {
    let sa = a.shell.coords().as_slice();
    let sb = b.shell.coords().as_slice();
    let pt = vertex_not_on(sa, sb)?;
    // A point inside one of b's holes escapes b's interior, so a shell
    // tucked into a hole stays valid.
    if locate_in_polygon(pt, b) != Location::Interior {
        return None;
    }
    Some(TopologyValidationError::at(ValidationErrorKind::NestedShells, pt))
}

// ---------------------------------------------------------------------------
// Ring geometry helpers
// ---------------------------------------------------------------------------

fn distinct_count(coords: &[Coordinate]) -> usize {
    coords.iter().collect::<AHashSet<_>>().len()
}

fn same_vertex_set(a: &[Coordinate], b: &[Coordinate]) -> bool {
    a.iter().collect::<AHashSet<_>>() == b.iter().collect::<AHashSet<_>>()
}

/// First vertex of `ring` that is not a vertex of `other`.  Rings sharing
/// every vertex yield nothing.
fn vertex_not_on(ring: &[Coordinate], other: &[Coordinate]) -> Option<Coordinate> {
    ring.iter().copied().find(|c| !other.contains(c))
}

/// First point where a ring meets itself away from its vertex chain, if any.
fn ring_self_intersection(ring: &[Coordinate]) -> Option<Coordinate> {
    let n = ring.len() - 1;
    let mut li = LineIntersector::new();
    for i in 0..n {
        for j in (i + 1)..n {
            li.compute(ring[i], ring[i + 1], ring[j], ring[j + 1]);
            if !li.has_intersection() {
                continue;
            }
            if li.kind == IntersectionKind::Collinear && li.pts[0] != li.pts[1] {
                return Some(li.pts[0]);
            }
            if li.proper {
                return Some(li.pts[0]);
            }
            // Consecutive segments may meet, but only at the vertex they
            // share.
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if !adjacent {
                return Some(li.pts[0]);
            }
            let shared = if j == i + 1 { ring[j] } else { ring[0] };
            if li.pts[0] != shared {
                return Some(li.pts[0]);
            }
        }
    }
    None
}

enum PairRelation {
    /// The rings cross, overlap, or meet in a point interior to a segment
    /// of each.
    Crossing(Coordinate),
    /// The rings meet only at isolated non-crossing points.
    Touching(Vec<Coordinate>),
}

fn ring_pair_relation(a: &[Coordinate], b: &[Coordinate]) -> PairRelation {
    let mut li = LineIntersector::new();
    let mut pts: Vec<Coordinate> = Vec::new();
    for i in 0..a.len() - 1 {
        for j in 0..b.len() - 1 {
            li.compute(a[i], a[i + 1], b[j], b[j + 1]);
            match li.kind {
                IntersectionKind::None => {}
                IntersectionKind::Collinear => {
                    if li.pts[0] != li.pts[1] {
                        return PairRelation::Crossing(li.pts[0]);
                    }
                    if !pts.contains(&li.pts[0]) {
                        pts.push(li.pts[0]);
                    }
                }
                IntersectionKind::Point => {
                    if li.proper {
                        return PairRelation::Crossing(li.pts[0]);
                    }
                    if !pts.contains(&li.pts[0]) {
                        pts.push(li.pts[0]);
                    }
                }
            }
        }
    }
    PairRelation::Touching(pts)
}

fn find_root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{CoordinateSeq, GeometryFactory};

    fn seq(pts: &[(f64, f64)]) -> CoordinateSeq {
        pts.to_vec().into()
    }

    fn polygon(shell: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Geometry {
        let f = GeometryFactory::floating();
        f.polygon(seq(shell), holes.iter().map(|h| seq(h)).collect()).unwrap()
    }

    const SQUARE: &[(f64, f64)] =
        &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)];

    #[test]
    fn simple_polygon_is_valid() {
        assert!(is_valid(&polygon(SQUARE, &[])));
    }

    #[test]
    fn polygon_with_interior_hole_is_valid() {
        let g = polygon(
            SQUARE,
            &[&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)]],
        );
        assert!(is_valid(&g));
    }

    #[test]
    fn bowtie_ring_self_intersects() {
        let g = polygon(
            &[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)],
            &[],
        );
        let e = check_valid(&g).unwrap();
        assert_eq!(e.kind, ValidationErrorKind::RingSelfIntersection);
        assert_eq!(e.coordinate, Some(Coordinate::new(5.0, 5.0)));
    }

    #[test]
    fn hole_outside_shell() {
        let g = polygon(
            SQUARE,
            &[&[(20.0, 20.0), (22.0, 20.0), (22.0, 22.0), (20.0, 22.0), (20.0, 20.0)]],
        );
        let e = check_valid(&g).unwrap();
        assert_eq!(e.kind, ValidationErrorKind::HoleOutsideShell);
    }

    #[test]
    fn hole_crossing_shell_is_a_self_intersection() {
        let g = polygon(
            SQUARE,
            &[&[(5.0, 5.0), (15.0, 5.0), (15.0, 7.0), (5.0, 7.0), (5.0, 5.0)]],
        );
        let e = check_valid(&g).unwrap();
        assert_eq!(e.kind, ValidationErrorKind::SelfIntersection);
    }

    #[test]
    fn nested_holes() {
        let g = polygon(
            SQUARE,
            &[
                &[(1.0, 1.0), (9.0, 1.0), (9.0, 9.0), (1.0, 9.0), (1.0, 1.0)],
                &[(3.0, 3.0), (6.0, 3.0), (6.0, 6.0), (3.0, 6.0), (3.0, 3.0)],
            ],
        );
        let e = check_valid(&g).unwrap();
        assert_eq!(e.kind, ValidationErrorKind::NestedHoles);
    }

    #[test]
    fn hole_touching_shell_at_one_point_is_valid() {
        let g = polygon(
            SQUARE,
            &[&[(0.0, 0.0), (4.0, 2.0), (2.0, 4.0), (0.0, 0.0)]],
        );
        assert!(is_valid(&g));
    }

    #[test]
    fn hole_touching_shell_twice_disconnects_the_interior() {
        // A dart-shaped hole pinned to the shell at two corners.
        let g = polygon(
            SQUARE,
            &[&[(0.0, 0.0), (5.0, 3.0), (10.0, 0.0), (5.0, 1.0), (0.0, 0.0)]],
        );
        let e = check_valid(&g).unwrap();
        assert_eq!(e.kind, ValidationErrorKind::DisconnectedInterior);
    }

    #[test]
    fn chain_of_touching_holes_disconnects_the_interior() {
        // Shell-hole-hole-shell touches form a cycle through the interior.
        let g = polygon(
            SQUARE,
            &[
                &[(0.0, 5.0), (4.0, 4.0), (5.0, 5.0), (4.0, 6.0), (0.0, 5.0)],
                &[(5.0, 5.0), (10.0, 5.0), (6.0, 6.0), (5.0, 5.0)],
            ],
        );
        let e = check_valid(&g).unwrap();
        assert_eq!(e.kind, ValidationErrorKind::DisconnectedInterior);
    }

    #[test]
    fn duplicate_rings() {
        let g = polygon(SQUARE, &[SQUARE]);
        let e = check_valid(&g).unwrap();
        assert_eq!(e.kind, ValidationErrorKind::DuplicateRings);
    }

    #[test]
    fn nested_shells() {
        let f = GeometryFactory::floating();
        let outer = f.polygon(seq(SQUARE), vec![]).unwrap();
        let inner = f
            .polygon(
                seq(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)]),
                vec![],
            )
            .unwrap();
        let (Geometry::Polygon(outer), Geometry::Polygon(inner)) = (outer, inner) else {
            unreachable!();
        };
        let g = Geometry::MultiPolygon(vec![outer, inner]);
        let e = check_valid(&g).unwrap();
        assert_eq!(e.kind, ValidationErrorKind::NestedShells);
    }

    #[test]
    fn shell_inside_a_hole_is_valid() {
        let f = GeometryFactory::floating();
        let donut = f
            .polygon(
                seq(SQUARE),
                vec![seq(&[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0), (2.0, 2.0)])],
            )
            .unwrap();
        let island = f
            .polygon(
                seq(&[(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0), (4.0, 4.0)]),
                vec![],
            )
            .unwrap();
        let (Geometry::Polygon(donut), Geometry::Polygon(island)) = (donut, island) else {
            unreachable!();
        };
        let g = Geometry::MultiPolygon(vec![donut, island]);
        assert!(is_valid(&g));
    }

    #[test]
    fn non_finite_coordinate() {
        let g = Geometry::Point(Coordinate::new(f64::NAN, 0.0));
        let e = check_valid(&g).unwrap();
        assert_eq!(e.kind, ValidationErrorKind::InvalidCoordinate);
    }

    #[test]
    fn line_with_one_distinct_point() {
        let f = GeometryFactory::floating();
        let g = f.line_string(seq(&[(1.0, 1.0), (1.0, 1.0)])).unwrap();
        let e = check_valid(&g).unwrap();
        assert_eq!(e.kind, ValidationErrorKind::TooFewPoints);
    }

    #[test]
    fn error_message_includes_location() {
        let g = polygon(
            &[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)],
            &[],
        );
        let e = check_valid(&g).unwrap();
        assert!(e.to_string().starts_with("Ring self-intersection at or near point"));
    }
}
