//! Precision reduction: snapping every coordinate of a geometry onto a
//! fixed grid.
//!
//! The structural shape of the input is preserved exactly; rings stay
//! closed because equal coordinates snap equally.  Snapping can collapse
//! distinct vertices together, so the output may be degenerate in ways the
//! input was not; consumers that care run their own cleaning afterwards.

use crate::geom::{
    Coordinate, CoordinateSeq, Geometry, LineString, LinearRing, Polygon, PrecisionModel,
};

#[derive(Clone, Copy, Debug)]
pub struct GeometryPrecisionReducer {
    precision: PrecisionModel,
}

impl GeometryPrecisionReducer {
    pub fn new(precision: PrecisionModel) -> Self {
        Self { precision }
    }

    pub fn reduce(&self, geom: &Geometry) -> Geometry {
        match geom {
            Geometry::Point(c) => Geometry::Point(self.precision.make_precise(*c)),
            Geometry::MultiPoint(cs) => Geometry::MultiPoint(
                cs.iter().map(|&c| self.precision.make_precise(c)).collect(),
            ),
            Geometry::LineString(l) => Geometry::LineString(self.reduce_line(l)),
            Geometry::LinearRing(r) => Geometry::LinearRing(self.reduce_ring(r)),
            Geometry::MultiLineString(ls) => {
                Geometry::MultiLineString(ls.iter().map(|l| self.reduce_line(l)).collect())
            }
            Geometry::Polygon(p) => Geometry::Polygon(self.reduce_polygon(p)),
            Geometry::MultiPolygon(ps) => {
                Geometry::MultiPolygon(ps.iter().map(|p| self.reduce_polygon(p)).collect())
            }
            Geometry::Collection(gs) => {
                Geometry::Collection(gs.iter().map(|g| self.reduce(g)).collect())
            }
        }
    }

    fn reduce_seq(&self, seq: &CoordinateSeq) -> CoordinateSeq {
        seq.iter().map(|&c| self.precision.make_precise(c)).collect()
    }

    fn reduce_line(&self, line: &LineString) -> LineString {
        LineString::raw(self.reduce_seq(line.coords()))
    }

    fn reduce_ring(&self, ring: &LinearRing) -> LinearRing {
        LinearRing::raw(self.reduce_seq(ring.coords()))
    }

    fn reduce_polygon(&self, poly: &Polygon) -> Polygon {
        Polygon::new(
            self.reduce_ring(&poly.shell),
            poly.holes.iter().map(|h| self.reduce_ring(h)).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::GeometryFactory;

    #[test]
    fn snaps_ordinates_to_the_grid() {
        let f = GeometryFactory::floating();
        let line = f
            .line_string(vec![(0.123, 0.456), (9.876, 5.432)])
            .unwrap();
        let reducer = GeometryPrecisionReducer::new(PrecisionModel::fixed(10.0));
        let out = reducer.reduce(&line);
        match out {
            Geometry::LineString(l) => {
                assert_eq!(l.coords().get(0), Some(Coordinate::new(0.1, 0.5)));
                assert_eq!(l.coords().get(1), Some(Coordinate::new(9.9, 5.4)));
            }
            other => panic!("expected line string, got {}", other.kind()),
        }
    }

    #[test]
    fn rings_stay_closed() {
        let f = GeometryFactory::floating();
        let poly = f
            .polygon(
                vec![(0.04, 0.04), (10.04, 0.0), (10.0, 10.0), (0.0, 10.04), (0.04, 0.04)],
                vec![],
            )
            .unwrap();
        let reducer = GeometryPrecisionReducer::new(PrecisionModel::fixed(1.0));
        match reducer.reduce(&poly) {
            Geometry::Polygon(p) => assert!(p.shell.coords().is_closed()),
            other => panic!("expected polygon, got {}", other.kind()),
        }
    }
}
