//! Polygonization: forming polygons from fully-noded linework.
//!
//! Lines that dead-end (dangles) and lines with the same face on both
//! sides (cut edges) cannot bound a polygon; they are peeled off and
//! reported separately.

mod graph;

use crate::algorithm::{is_ccw, point_in_ring};
use crate::geom::{Coordinate, CoordinateSeq, Envelope, Geometry, LinearRing, Polygon};

use graph::PolygonizeGraph;

/// Accumulates linework, then forms the maximal set of polygons it bounds.
#[derive(Default)]
pub struct Polygonizer {
    lines: Vec<Vec<Coordinate>>,
    output: Option<Output>,
}

struct Output {
    polygons: Vec<Polygon>,
    dangles: Vec<Vec<Coordinate>>,
    cut_edges: Vec<Vec<Coordinate>>,
    invalid_ring_lines: Vec<Vec<Coordinate>>,
}

impl Polygonizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the linework of a geometry.  Input must already be noded: lines
    /// may share endpoints but not cross or overlap.
    pub fn add(&mut self, geom: &Geometry) {
        for line in geom.lines() {
            self.lines.push(line.as_slice().to_vec());
        }
        self.output = None;
    }

    pub fn polygons(&mut self) -> &[Polygon] {
        &self.compute().polygons
    }

    /// Lines that dead-ended and were excluded.
    pub fn dangles(&mut self) -> &[Vec<Coordinate>] {
        &self.compute().dangles
    }

    /// Lines with the same face on both sides, excluded after dangle
    /// removal.
    pub fn cut_edges(&mut self) -> &[Vec<Coordinate>] {
        &self.compute().cut_edges
    }

    /// Face traces too short to close a valid ring.
    pub fn invalid_ring_lines(&mut self) -> &[Vec<Coordinate>] {
        &self.compute().invalid_ring_lines
    }

    fn compute(&mut self) -> &Output {
        if self.output.is_none() {
            self.output = Some(self.run());
        }
        // Just set above.
        self.output.as_ref().unwrap_or(&EMPTY_OUTPUT)
    }

    fn run(&self) -> Output {
        let mut graph = PolygonizeGraph::new();
        for line in &self.lines {
            graph.add_line(line);
        }
        if graph.is_empty() {
            return Output {
                polygons: Vec::new(),
                dangles: Vec::new(),
                cut_edges: Vec::new(),
                invalid_ring_lines: Vec::new(),
            };
        }
        let dangles = graph.delete_dangles();
        let cut_edges = graph.delete_cut_edges();
        let (rings, invalid_ring_lines): (Vec<_>, Vec<_>) =
            graph.extract_rings().into_iter().partition(|r| r.len() >= 4);
        let polygons = assemble(rings);
        Output { polygons, dangles, cut_edges, invalid_ring_lines }
    }
}

static EMPTY_OUTPUT: Output = Output {
    polygons: Vec::new(),
    dangles: Vec::new(),
    cut_edges: Vec::new(),
    invalid_ring_lines: Vec::new(),
};

/// Sort face rings into shells and holes and assemble polygons.
///
/// Faces are traced with their interior on the right, so bounded faces
/// come out clockwise.  A counter-clockwise ring is either the trace of
/// the unbounded face (every vertex shared with some shell, no container)
/// or a true hole of the shell that contains it.
fn assemble(rings: Vec<Vec<Coordinate>>) -> Vec<Polygon> {
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
        let mut best: Option<usize> = None;
        for (i, (shell, shell_env)) in shells.iter().enumerate() {
            if !shell_env.contains(&env) {
                continue;
            }
            // Probe with a hole vertex that is not a shell vertex; if every
            // vertex is shared the rings coincide and this shell is not a
            // container.
            let Some(&pt) = hole.iter().find(|&c| !shell.contains(c)) else {
                continue;
            };
            if !point_in_ring(pt, shell) {
                continue;
            }
            let smaller = best.is_none_or(|b| env_area(shell_env) < env_area(&shells[b].1));
            if smaller {
                best = Some(i);
            }
        }
        if let Some(i) = best {
            hole_lists[i].push(hole);
        }
        // No container: the trace of the unbounded face, dropped.
    }

    shells
        .into_iter()
        .zip(hole_lists)
        .filter_map(|((shell, _), holes)| {
            let shell = LinearRing::new(CoordinateSeq::from_coords(shell)).ok()?;
            let holes = holes
                .into_iter()
                .map(|h| LinearRing::new(CoordinateSeq::from_coords(h)))
                .collect::<Result<Vec<_>, _>>()
                .ok()?;
            Some(Polygon::new(shell, holes))
        })
        .collect()
}

fn env_area(env: &Envelope) -> f64 {
    (env.max_x - env.min_x) * (env.max_y - env.min_y)
}
