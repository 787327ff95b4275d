//! The polygonization graph: a planar graph with face linking, dangle and
//! cut-edge removal, and ring extraction.

use planargraph::{DirEdgeId, NodeId, PlanarGraph};

use crate::geom::Coordinate;

pub(super) struct PolygonizeGraph {
    g: PlanarGraph,
    next: Vec<Option<DirEdgeId>>,
}

impl PolygonizeGraph {
    pub fn new() -> Self {
        Self { g: PlanarGraph::new(), next: Vec::new() }
    }

    /// Add one fully-noded line as a single edge.  Repeated consecutive
    /// points are dropped; degenerate lines are ignored.
    pub fn add_line(&mut self, coords: &[Coordinate]) {
        let mut clean: Vec<geo::Coord<f64>> = Vec::with_capacity(coords.len());
        for &c in coords {
            let c = geo::Coord::from(c);
            if clean.last() != Some(&c) {
                clean.push(c);
            }
        }
        if clean.len() < 2 {
            return;
        }
        self.g.add_edge(clean);
    }

    pub fn is_empty(&self) -> bool {
        self.g.num_edges() == 0
    }

    /// Remove every edge chain that dead-ends, returning the removed
    /// linework.
    pub fn delete_dangles(&mut self) -> Vec<Vec<Coordinate>> {
        let mut dangles = Vec::new();
        let mut stack: Vec<NodeId> = (0..self.g.num_nodes())
            .map(NodeId)
            .filter(|&n| self.g.degree(n) == 1)
            .collect();
        while let Some(n) = stack.pop() {
            if self.g.degree(n) != 1 {
                continue;
            }
            let star: Vec<DirEdgeId> = self.g.star(n).to_vec();
            for de in star {
                let d = self.g.dir_edge(de);
                if d.marked {
                    continue;
                }
                let edge = d.edge;
                let far = d.to;
                dangles.push(
                    self.g.edge(edge).coords.iter().map(|&c| Coordinate::from(c)).collect(),
                );
                self.g.mark_edge(edge);
                if self.g.degree(far) == 1 {
                    stack.push(far);
                }
            }
        }
        dangles
    }

    /// Point every incoming directed edge at the outgoing edge that keeps
    /// the face on its right: the CCW successor of its sym in the star.
    pub fn link_face_edges(&mut self) {
        self.next = vec![None; self.g.dir_edges.len()];
        for n in 0..self.g.num_nodes() {
            let star: Vec<DirEdgeId> = self
                .g
                .star(NodeId(n))
                .iter()
                .copied()
                .filter(|&de| !self.g.dir_edge(de).marked)
                .collect();
            let k = star.len();
            for (i, &out) in star.iter().enumerate() {
                let inc = self.g.dir_edge(out).sym;
                self.next[inc.0] = Some(star[(i + 1) % k]);
            }
        }
    }

    /// Remove edges both of whose directed views trace the same face, and
    /// return their linework.  Such edges cannot bound any polygon.
    pub fn delete_cut_edges(&mut self) -> Vec<Vec<Coordinate>> {
        self.link_face_edges();
        let ring_of = self.label_rings();
        let mut cut = Vec::new();
        for e in 0..self.g.num_edges() {
            let edge = &self.g.edges[e];
            if edge.marked {
                continue;
            }
            if ring_of[edge.forward.0] == ring_of[edge.reverse.0] {
                cut.push(edge.coords.iter().map(|&c| Coordinate::from(c)).collect());
                self.g.mark_edge(planargraph::EdgeId(e));
            }
        }
        if !cut.is_empty() {
            self.link_face_edges();
        }
        cut
    }

    /// Face id per directed edge, by walking the next chains.
    fn label_rings(&self) -> Vec<Option<usize>> {
        let mut label: Vec<Option<usize>> = vec![None; self.g.dir_edges.len()];
        let mut ring = 0usize;
        for start in 0..self.g.dir_edges.len() {
            if label[start].is_some() || self.g.dir_edges[start].marked {
                continue;
            }
            let mut cur = DirEdgeId(start);
            while label[cur.0].is_none() {
                label[cur.0] = Some(ring);
                match self.next[cur.0] {
                    Some(n) => cur = n,
                    None => break,
                }
            }
            ring += 1;
        }
        label
    }

    /// Trace every face into a closed coordinate ring.
    pub fn extract_rings(&mut self) -> Vec<Vec<Coordinate>> {
        self.g.clear_visited();
        let mut rings = Vec::new();
        for start in 0..self.g.dir_edges.len() {
            if self.g.dir_edges[start].marked || self.g.dir_edges[start].visited {
                continue;
            }
            let mut ring: Vec<Coordinate> = Vec::new();
            let mut cur = DirEdgeId(start);
            let mut complete = true;
            loop {
                if self.g.dir_edges[cur.0].visited {
                    complete = false;
                    break;
                }
                self.g.dir_edges[cur.0].visited = true;
                for c in self.g.dir_edge_coords(cur) {
                    let c = Coordinate::from(c);
                    if ring.last() != Some(&c) {
                        ring.push(c);
                    }
                }
                ring.pop();
                match self.next[cur.0] {
                    Some(n) => cur = n,
                    None => {
                        complete = false;
                        break;
                    }
                }
                if cur == DirEdgeId(start) {
                    break;
                }
            }
            if !complete {
                continue;
            }
            if let Some(&first) = ring.first() {
                ring.push(first);
            }
            rings.push(ring);
        }
        rings
    }
}
