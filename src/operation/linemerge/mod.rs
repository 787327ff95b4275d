//! Line merging: sewing fully-noded linework into maximal merged lines.
//!
//! A merged line runs from one node of degree other than two to another,
//! passing straight through every degree-two node in between.  Input
//! orientation is ignored; pieces are flipped as needed while sewing.

use planargraph::{DirEdgeId, NodeId, PlanarGraph};

use crate::geom::{Coordinate, CoordinateSeq, Geometry, LineString};

/// Accumulates linework, then sews it into maximal merged line strings.
///
/// Input must already be noded: lines may share endpoints but not cross
/// or overlap.
#[derive(Default)]
pub struct LineMerger {
    lines: Vec<Vec<Coordinate>>,
    merged: Option<Vec<LineString>>,
}

impl LineMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the linework of a geometry.
    pub fn add(&mut self, geom: &Geometry) {
        for line in geom.lines() {
            self.lines.push(line.as_slice().to_vec());
        }
        self.merged = None;
    }

    pub fn merged_lines(&mut self) -> &[LineString] {
        if self.merged.is_none() {
            self.merged = Some(self.run());
        }
        // Just set above.
        self.merged.as_deref().unwrap_or(&[])
    }

    fn run(&self) -> Vec<LineString> {
        let mut graph = PlanarGraph::new();
        for line in &self.lines {
            let mut clean: Vec<geo::Coord<f64>> = Vec::with_capacity(line.len());
            for &c in line {
                let c = geo::Coord::from(c);
                if clean.last() != Some(&c) {
                    clean.push(c);
                }
            }
            if clean.len() >= 2 {
                graph.add_edge(clean);
            }
        }

        let mut chains = Vec::new();
        // Chains start wherever the linework does not simply pass through.
        for n in 0..graph.num_nodes() {
            if graph.degree(NodeId(n)) == 2 {
                continue;
            }
            let star: Vec<DirEdgeId> = graph.star(NodeId(n)).to_vec();
            for de in star {
                if !graph.dir_edge(de).visited {
                    chains.push(walk_chain(&mut graph, de));
                }
            }
        }
        // Whatever remains is closed loops of degree-two nodes.
        for i in 0..graph.dir_edges.len() {
            if !graph.dir_edges[i].visited {
                chains.push(walk_chain(&mut graph, DirEdgeId(i)));
            }
        }

        chains
            .into_iter()
            .filter_map(|c| LineString::new(CoordinateSeq::from_coords(c)).ok())
            .collect()
    }
}

/// Follow a chain of edges through degree-two nodes, collecting its
/// coordinates and marking both directions of each edge visited.
fn walk_chain(graph: &mut PlanarGraph, start: DirEdgeId) -> Vec<Coordinate> {
    let mut coords: Vec<Coordinate> = Vec::new();
    let mut de = start;
    loop {
        let sym = graph.dir_edge(de).sym;
        graph.dir_edges[de.0].visited = true;
        graph.dir_edges[sym.0].visited = true;
        let skip = usize::from(!coords.is_empty());
        coords.extend(graph.dir_edge_coords(de).into_iter().skip(skip).map(Coordinate::from));
        let at = graph.dir_edge(de).to;
        if graph.degree(at) != 2 {
            break;
        }
        let Some(&next) = graph.star(at).iter().find(|&&out| !graph.dir_edge(out).visited)
        else {
            // A loop has closed on itself.
            break;
        };
        de = next;
    }
    coords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::GeometryFactory;

    fn add_line(m: &mut LineMerger, pts: &[(f64, f64)]) {
        let f = GeometryFactory::floating();
        m.add(&f.line_string(pts.to_vec()).unwrap());
    }

    #[test]
    fn collinear_pieces_merge_into_one_line() {
        let mut m = LineMerger::new();
        add_line(&mut m, &[(0.0, 0.0), (1.0, 0.0)]);
        add_line(&mut m, &[(1.0, 0.0), (2.0, 0.0)]);
        let lines = m.merged_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 3);
    }

    #[test]
    fn opposite_orientations_still_merge() {
        let mut m = LineMerger::new();
        add_line(&mut m, &[(0.0, 0.0), (1.0, 0.0)]);
        add_line(&mut m, &[(2.0, 0.0), (1.0, 0.0)]);
        let lines = m.merged_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 3);
    }

    #[test]
    fn junction_stops_the_merge() {
        let mut m = LineMerger::new();
        add_line(&mut m, &[(0.0, 0.0), (1.0, 0.0)]);
        add_line(&mut m, &[(1.0, 0.0), (2.0, 0.0)]);
        add_line(&mut m, &[(1.0, 0.0), (1.0, 1.0)]);
        let lines = m.merged_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.len() == 2));
    }

    #[test]
    fn closed_loop_merges_into_one_closed_line() {
        let mut m = LineMerger::new();
        add_line(&mut m, &[(0.0, 0.0), (10.0, 0.0)]);
        add_line(&mut m, &[(10.0, 0.0), (10.0, 10.0)]);
        add_line(&mut m, &[(10.0, 10.0), (0.0, 10.0)]);
        add_line(&mut m, &[(0.0, 10.0), (0.0, 0.0)]);
        let lines = m.merged_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 5);
        assert!(lines[0].is_closed());
    }

    #[test]
    fn branching_network_merges_between_junctions() {
        let mut m = LineMerger::new();
        add_line(&mut m, &[(220.0, 160.0), (240.0, 150.0), (270.0, 150.0), (290.0, 170.0)]);
        add_line(&mut m, &[(60.0, 210.0), (30.0, 190.0), (30.0, 160.0)]);
        add_line(&mut m, &[(70.0, 430.0), (100.0, 430.0), (120.0, 420.0), (140.0, 400.0)]);
        add_line(&mut m, &[(160.0, 310.0), (160.0, 280.0), (160.0, 250.0), (170.0, 230.0)]);
        add_line(&mut m, &[(170.0, 230.0), (180.0, 210.0), (200.0, 180.0), (220.0, 160.0)]);
        add_line(&mut m, &[(30.0, 160.0), (40.0, 150.0), (70.0, 140.0)]);
        add_line(&mut m, &[(160.0, 310.0), (200.0, 330.0), (220.0, 340.0), (240.0, 360.0)]);
        add_line(&mut m, &[(140.0, 400.0), (150.0, 370.0), (160.0, 340.0), (160.0, 310.0)]);
        add_line(&mut m, &[(160.0, 310.0), (130.0, 300.0), (100.0, 290.0), (70.0, 270.0)]);
        let mut lens: Vec<usize> = m.merged_lines().iter().map(|l| l.len()).collect();
        lens.sort_unstable();
        assert_eq!(lens, vec![4, 4, 5, 7, 10]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let mut m = LineMerger::new();
        assert!(m.merged_lines().is_empty());
    }
}
