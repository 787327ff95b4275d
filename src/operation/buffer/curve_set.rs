//! Generation of the full set of offset curves for a geometry.
//!
//! Every component contributes closed curves with the buffered area on
//! their right; the graph machinery does the rest.  Rings that a negative
//! (or, for holes, positive) distance would erode completely are dropped
//! here, before they can generate inverted curves.

use crate::algorithm::is_ccw;
use crate::geom::{Coordinate, Envelope, Geometry, LinearRing, Polygon, PrecisionModel};
use crate::geomgraph::{Label, Position};

use super::offset_curve::OffsetCurveBuilder;
use super::params::BufferParams;

pub struct CurveSetBuilder {
    offset: OffsetCurveBuilder,
    distance: f64,
    curves: Vec<(Vec<Coordinate>, Label)>,
}

impl CurveSetBuilder {
    pub fn new(precision: PrecisionModel, params: BufferParams, distance: f64) -> Self {
        Self {
            offset: OffsetCurveBuilder::new(precision, params),
            distance,
            curves: Vec::new(),
        }
    }

    pub fn curves(mut self, geom: &Geometry) -> Vec<(Vec<Coordinate>, Label)> {
        self.add_geometry(geom);
        self.curves
    }

    fn add_geometry(&mut self, geom: &Geometry) {
        match geom {
            Geometry::Point(c) => self.add_point(*c),
            Geometry::MultiPoint(cs) => cs.iter().for_each(|&c| self.add_point(c)),
            Geometry::LineString(l) => self.add_line(l.coords().as_slice()),
            Geometry::LinearRing(r) => self.add_ring_line(r),
            Geometry::MultiLineString(ls) => {
                ls.iter().for_each(|l| self.add_line(l.coords().as_slice()))
            }
            Geometry::Polygon(p) => self.add_polygon(p),
            Geometry::MultiPolygon(ps) => ps.iter().for_each(|p| self.add_polygon(p)),
            Geometry::Collection(gs) => gs.iter().for_each(|g| self.add_geometry(g)),
        }
    }

    fn add_curve(&mut self, curve: Option<Vec<Coordinate>>) {
        if let Some(curve) = curve {
            if curve.len() >= 4 {
                self.curves.push((curve, Label::area_boundary()));
            }
        }
    }

    fn add_point(&mut self, c: Coordinate) {
        let curve = self.offset.point_curve(c, self.distance);
        self.add_curve(curve);
    }

    fn add_line(&mut self, coords: &[Coordinate]) {
        let clean = without_repeated(coords);
        if clean.is_empty() {
            return;
        }
        let curve = self.offset.line_curve(&clean, self.distance);
        self.add_curve(curve);
    }

    /// A ring geometry buffers to the annulus around its linework: an
    /// outer offset of the clockwise traversal and an inner offset of the
    /// counter-clockwise one, both with the annulus on their right.  When
    /// the distance swallows the enclosed region the inner curve is
    /// dropped and the result fills in.
    fn add_ring_line(&mut self, ring: &LinearRing) {
        if self.distance <= 0.0 {
            return;
        }
        let Some(cw) = oriented_ring(ring, false) else {
            self.add_line(ring.coords().as_slice());
            return;
        };
        let curve = self.offset.ring_curve(&cw, Position::Left, self.distance);
        self.add_curve(curve);

        if !is_eroded_completely(&cw, self.distance) {
            let mut ccw = cw;
            ccw.reverse();
            let curve = self.offset.ring_curve(&ccw, Position::Left, self.distance);
            self.add_curve(curve);
        }
    }

    fn add_polygon(&mut self, poly: &Polygon) {
        // Shell oriented clockwise, interior on the right of travel.
        let Some(shell) = oriented_ring(&poly.shell, false) else {
            return;
        };
        // A negative distance wider than the shell erodes the whole
        // polygon.
        if self.distance < 0.0 && is_eroded_completely(&shell, self.distance) {
            return;
        }
        let (side, offset_distance) = if self.distance < 0.0 {
            (Position::Right, -self.distance)
        } else {
            (Position::Left, self.distance)
        };
        let curve = self.offset.ring_curve(&shell, side, offset_distance);
        self.add_curve(curve);

        for hole in &poly.holes {
            // Holes counter-clockwise, polygon interior again on the right.
            let Some(hole) = oriented_ring(hole, true) else {
                continue;
            };
            // A positive distance shrinks holes; drop ones it swallows.
            if self.distance > 0.0 && is_eroded_completely(&hole, -self.distance) {
                continue;
            }
            let curve = self.offset.ring_curve(&hole, side, offset_distance);
            self.add_curve(curve);
        }
    }
}

fn without_repeated(coords: &[Coordinate]) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(coords.len());
    for &c in coords {
        if out.last() != Some(&c) {
            out.push(c);
        }
    }
    out
}

/// The ring's coordinates oriented counter-clockwise or clockwise as
/// requested, or `None` for a degenerate ring.
fn oriented_ring(ring: &LinearRing, ccw: bool) -> Option<Vec<Coordinate>> {
    let clean = without_repeated(ring.coords().as_slice());
    if clean.len() < 4 {
        return None;
    }
    let mut coords = clean;
    if is_ccw(&coords) != ccw {
        coords.reverse();
    }
    Some(coords)
}

/// Envelope heuristic: an inward offset of `|distance|` leaves nothing of a
/// ring thinner than twice that.
fn is_eroded_completely(ring: &[Coordinate], distance: f64) -> bool {
    if ring.len() < 4 {
        return true;
    }
    let env = Envelope::from_coords(ring.iter());
    let min_dim = (env.max_x - env.min_x).min(env.max_y - env.min_y);
    2.0 * distance.abs() > min_dim
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::GeometryFactory;

    fn factory() -> GeometryFactory {
        GeometryFactory::floating()
    }

    #[test]
    fn positive_distance_polygon_emits_shell_and_hole_curves() {
        let f = factory();
        let poly = f
            .polygon(
                vec![(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0), (0.0, 0.0)],
                vec![vec![(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0), (5.0, 5.0)].into()],
            )
            .unwrap();
        let curves =
            CurveSetBuilder::new(PrecisionModel::Floating, BufferParams::default(), 1.0)
                .curves(&poly);
        assert_eq!(curves.len(), 2);
    }

    #[test]
    fn swallowed_hole_is_dropped() {
        let f = factory();
        let poly = f
            .polygon(
                vec![(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0), (0.0, 0.0)],
                vec![vec![(9.0, 9.0), (11.0, 9.0), (11.0, 11.0), (9.0, 11.0), (9.0, 9.0)].into()],
            )
            .unwrap();
        let curves =
            CurveSetBuilder::new(PrecisionModel::Floating, BufferParams::default(), 5.0)
                .curves(&poly);
        assert_eq!(curves.len(), 1);
    }

    #[test]
    fn eroded_shell_emits_nothing() {
        let f = factory();
        let poly = f
            .polygon(
                vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)],
                vec![],
            )
            .unwrap();
        let curves =
            CurveSetBuilder::new(PrecisionModel::Floating, BufferParams::default(), -3.0)
                .curves(&poly);
        assert!(curves.is_empty());
    }

    #[test]
    fn zero_distance_line_emits_nothing() {
        let f = factory();
        let line = f.line_string(vec![(0.0, 0.0), (10.0, 0.0)]).unwrap();
        let curves =
            CurveSetBuilder::new(PrecisionModel::Floating, BufferParams::default(), 0.0)
                .curves(&line);
        assert!(curves.is_empty());
    }
}
