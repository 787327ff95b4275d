//! The buffer pipeline: curves, noding, depths, ring assembly.

use crate::algorithm::{is_ccw, point_in_ring};
use crate::error::{Result, TopologyError};
use crate::geom::{
    Coordinate, CoordinateSeq, Envelope, Geometry, GeometryFactory, LinearRing, Polygon,
    PrecisionModel,
};
use crate::geomgraph::{Label, OverlayGraph};
use crate::noding::{IndexNoder, Noder, SegmentString};

use super::curve_set::CurveSetBuilder;
use super::params::BufferParams;

/// Builds one buffer attempt at a fixed precision.  A `TopologyError` here
/// means this precision failed, not that the input is unbuffereable.
pub struct BufferBuilder {
    params: BufferParams,
    precision: PrecisionModel,
}

impl BufferBuilder {
    pub fn new(params: BufferParams, precision: PrecisionModel) -> Self {
        Self { params, precision }
    }

    pub fn buffer(&self, geom: &Geometry, distance: f64) -> Result<Geometry> {
        let curves =
            CurveSetBuilder::new(self.precision, self.params, distance).curves(geom);
        if curves.is_empty() {
            return Ok(Geometry::MultiPolygon(Vec::new()));
        }

        let labels: Vec<Label> = curves.iter().map(|(_, l)| *l).collect();
        let strings: Vec<SegmentString> = curves
            .into_iter()
            .enumerate()
            .map(|(i, (coords, _))| SegmentString::new(coords, i))
            .collect();
        let noded = IndexNoder::with_precision(self.precision).node(strings);

        let mut graph = OverlayGraph::new();
        for piece in &noded {
            graph.insert_edge(piece.coords(), labels[piece.data]);
        }
        graph.compute_depths()?;
        graph.mark_in_result();
        graph.link_result_edges()?;
        let rings = graph.extract_rings()?;

        let polys = assemble_polygons(rings)?;
        let factory = GeometryFactory::new(self.precision);
        Ok(match polys.len() {
            0 => Geometry::MultiPolygon(Vec::new()),
            1 => Geometry::Polygon(polys.into_iter().next().ok_or_else(|| {
                TopologyError::new("polygon assembly lost its only shell")
            })?),
            _ => factory.multi_polygon(polys),
        })
    }
}

/// Sort raw rings into shells and holes and assign each hole to the
/// smallest shell containing it.
fn assemble_polygons(rings: Vec<Vec<Coordinate>>) -> Result<Vec<Polygon>> {
    let mut shells: Vec<(Vec<Coordinate>, Envelope)> = Vec::new();
    let mut holes: Vec<(Vec<Coordinate>, Envelope)> = Vec::new();
    for ring in rings {
        let env = Envelope::from_coords(ring.iter());
        if is_ccw(&ring) {
            holes.push((ring, env));
        } else {
            shells.push((ring, env));
        }
    }

    let mut hole_lists: Vec<Vec<Vec<Coordinate>>> = vec![Vec::new(); shells.len()];
    for (hole, env) in holes {
        let pt = hole[0];
        let mut best: Option<usize> = None;
        for (i, (shell, shell_env)) in shells.iter().enumerate() {
            if !shell_env.contains(&env) {
                continue;
            }
            if !point_in_ring(pt, shell) {
                continue;
            }
            let smaller =
                best.is_none_or(|b| shell_env_area(shell_env) < shell_env_area(&shells[b].1));
            if smaller {
                best = Some(i);
            }
        }
        match best {
            Some(i) => hole_lists[i].push(hole),
            None => {
                return Err(TopologyError::at("unable to assign hole to a shell", pt));
            }
        }
    }

    let mut polys = Vec::with_capacity(shells.len());
    for ((shell, _), hole_coords) in shells.into_iter().zip(hole_lists) {
        let shell = ring_from_coords(shell)?;
        let holes = hole_coords
            .into_iter()
            .map(ring_from_coords)
            .collect::<Result<Vec<_>>>()?;
        polys.push(Polygon::new(shell, holes));
    }
    Ok(polys)
}

fn shell_env_area(env: &Envelope) -> f64 {
    (env.max_x - env.min_x) * (env.max_y - env.min_y)
}

fn ring_from_coords(coords: Vec<Coordinate>) -> Result<LinearRing> {
    LinearRing::new(CoordinateSeq::from_coords(coords))
        .map_err(|e| TopologyError::new(format!("malformed result ring: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::GeometryFactory;
    use std::f64::consts::PI;

    fn build(geom: &Geometry, distance: f64) -> Geometry {
        BufferBuilder::new(BufferParams::default(), PrecisionModel::Floating)
            .buffer(geom, distance)
            .unwrap()
    }

    #[test]
    fn point_buffer_is_one_polygon_near_circle_area() {
        let f = GeometryFactory::floating();
        let out = build(&f.point(Coordinate::new(5.0, 5.0)), 10.0);
        let area = out.area();
        assert!(area > 0.98 * PI * 100.0 && area < PI * 100.0);
        assert!(matches!(out, Geometry::Polygon(_)));
    }

    #[test]
    fn square_buffer_grows_by_rounded_margin() {
        let f = GeometryFactory::floating();
        let square = f
            .polygon(
                vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
                vec![],
            )
            .unwrap();
        let out = build(&square, 2.0);
        let expect = 100.0 + 4.0 * 20.0 + PI * 4.0;
        let area = out.area();
        assert!(area > 0.98 * expect && area <= expect);
    }

    #[test]
    fn zero_distance_polygon_buffer_preserves_area() {
        let f = GeometryFactory::floating();
        let square = f
            .polygon(
                vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
                vec![],
            )
            .unwrap();
        let out = build(&square, 0.0);
        assert!((out.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn negative_buffer_shrinks_the_square() {
        let f = GeometryFactory::floating();
        let square = f
            .polygon(
                vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
                vec![],
            )
            .unwrap();
        let out = build(&square, -2.0);
        assert!((out.area() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn overlapping_buffers_union() {
        let f = GeometryFactory::floating();
        let pts = f.multi_point(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)]);
        let out = build(&pts, 5.0);
        // Two heavily overlapping discs fuse into one polygon.
        assert!(matches!(out, Geometry::Polygon(_)));
        let single = build(&f.point(Coordinate::new(0.0, 0.0)), 5.0).area();
        let area = out.area();
        assert!(area > single && area < 2.0 * single);
    }

    #[test]
    fn distant_buffers_stay_separate() {
        let f = GeometryFactory::floating();
        let pts = f.multi_point(vec![Coordinate::new(0.0, 0.0), Coordinate::new(100.0, 0.0)]);
        let out = build(&pts, 5.0);
        match out {
            Geometry::MultiPolygon(ps) => assert_eq!(ps.len(), 2),
            other => panic!("expected two polygons, got {}", other.kind()),
        }
    }

    #[test]
    fn polygon_with_hole_keeps_hole_when_buffering_inward() {
        let f = GeometryFactory::floating();
        let poly = f
            .polygon(
                vec![(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (0.0, 30.0), (0.0, 0.0)],
                vec![vec![
                    (10.0, 10.0),
                    (20.0, 10.0),
                    (20.0, 20.0),
                    (10.0, 20.0),
                    (10.0, 10.0),
                ]
                .into()],
            )
            .unwrap();
        let out = build(&poly, -1.0);
        match out {
            Geometry::Polygon(p) => {
                assert_eq!(p.holes.len(), 1);
                // Shell shrinks with sharp corners, hole dilates with
                // rounded ones.
                let expect = 28.0 * 28.0 - (100.0 + 40.0 + PI);
                assert!((p.area() - expect).abs() < 0.2);
            }
            other => panic!("expected polygon, got {}", other.kind()),
        }
    }
}
