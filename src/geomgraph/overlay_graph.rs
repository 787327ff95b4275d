//! Depth-labelled planar graph for area construction.
//!
//! Noded curve pieces are inserted as edges; coincident pieces collapse
//! into one edge with a summed depth delta.  Depths count how many curve
//! layers cover the region on each side of an edge.  They are seeded once
//! per connected component by exact ray crossing against the rest of the
//! arrangement, then propagated across node stars.  Edges bounding the covered
//! region on exactly one side form the result boundary, which is linked
//! into rings by walking each face with the covered side kept to the
//! right.

use std::collections::VecDeque;

use ahash::AHashMap;
use planargraph::{DirEdgeId, EdgeId, NodeId, PlanarGraph};

use crate::algorithm::predicates::segment_crosses_positive_ray;
use crate::error::{Result, TopologyError};
use crate::geom::Coordinate;

use super::Label;

#[derive(Clone, Debug)]
struct EdgeInfo {
    /// Right depth minus left depth, in forward orientation.
    delta: i32,
    label: Label,
    /// (left, right) depths in forward orientation, once assigned.
    depths: Option<(i32, i32)>,
}

#[derive(Clone, Debug)]
struct DirInfo {
    in_result: bool,
    next: Option<DirEdgeId>,
}

/// A planar graph whose edges carry side-depth information.
pub struct OverlayGraph {
    graph: PlanarGraph,
    edges: Vec<EdgeInfo>,
    dirs: Vec<DirInfo>,
    edge_map: AHashMap<Vec<(u64, u64)>, EdgeId>,
}

fn chain_key(coords: &[Coordinate]) -> Vec<(u64, u64)> {
    coords.iter().map(Coordinate::key).collect()
}

impl Default for OverlayGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayGraph {
    pub fn new() -> Self {
        Self {
            graph: PlanarGraph::new(),
            edges: Vec::new(),
            dirs: Vec::new(),
            edge_map: AHashMap::new(),
        }
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Insert one noded curve piece.  A piece whose chain coincides with an
    /// existing edge (in either orientation) merges into it by summing the
    /// depth deltas.
    pub fn insert_edge(&mut self, coords: &[Coordinate], label: Label) {
        let mut clean: Vec<Coordinate> = Vec::with_capacity(coords.len());
        for &c in coords {
            if clean.last() != Some(&c) {
                clean.push(c);
            }
        }
        if clean.len() < 2 {
            return;
        }

        if let Some(&id) = self.edge_map.get(&chain_key(&clean)) {
            self.edges[id.0].delta += label.depth_delta();
            return;
        }
        let mut rev = clean.clone();
        rev.reverse();
        if let Some(&id) = self.edge_map.get(&chain_key(&rev)) {
            self.edges[id.0].delta += label.flipped().depth_delta();
            return;
        }

        let id = self
            .graph
            .add_edge(clean.iter().map(|&c| geo::Coord::from(c)).collect());
        debug_assert_eq!(id.0, self.edges.len());
        self.edges.push(EdgeInfo { delta: label.depth_delta(), label, depths: None });
        self.dirs.push(DirInfo { in_result: false, next: None });
        self.dirs.push(DirInfo { in_result: false, next: None });
        self.edge_map.insert(chain_key(&clean), id);
    }

    pub fn label(&self, edge: EdgeId) -> Label {
        self.edges[edge.0].label
    }

    // -----------------------------------------------------------------------
    // Depth assignment
    // -----------------------------------------------------------------------

    /// Assign side depths to every edge.
    pub fn compute_depths(&mut self) -> Result<()> {
        for start in 0..self.edges.len() {
            if self.edges[start].depths.is_some() {
                continue;
            }
            let comp = self.component_edges(EdgeId(start));
            let seeded = self.seed_component(&comp)?;
            self.propagate_from(seeded)?;
            for &e in &comp {
                if self.edges[e.0].depths.is_none() {
                    return Err(TopologyError::new("unable to assign edge depths"));
                }
            }
        }
        Ok(())
    }

    /// All edges reachable from `start` through shared nodes.
    fn component_edges(&self, start: EdgeId) -> Vec<EdgeId> {
        let mut seen = vec![false; self.edges.len()];
        let mut out = Vec::new();
        let mut queue = VecDeque::from([start]);
        seen[start.0] = true;
        while let Some(e) = queue.pop_front() {
            out.push(e);
            let fwd = self.graph.edge(e).forward;
            let d = self.graph.dir_edge(fwd);
            for node in [d.from, d.to] {
                for &de in self.graph.star(node) {
                    let other = self.graph.dir_edge(de).edge;
                    if !seen[other.0] {
                        seen[other.0] = true;
                        queue.push_back(other);
                    }
                }
            }
        }
        out
    }

    /// Seed one edge of a component and return it.
    ///
    /// Picks a non-horizontal segment, then computes the depth of the
    /// region just east of its midpoint by summing signed crossings of a
    /// rightward ray over every other segment in the graph.  Summing over
    /// the whole arrangement, not just `comp`, gives components nested
    /// inside another component's covered area their enclosing depth
    /// instead of a fresh zero.
    fn seed_component(&mut self, comp: &[EdgeId]) -> Result<EdgeId> {
        let (seed_edge, si) = self
            .find_non_horizontal(comp)
            .ok_or_else(|| TopologyError::new("cannot seed depths of a flat component"))?;
        let coords = &self.graph.edge(seed_edge).coords;
        let (a, b) = (coords[si], coords[si + 1]);
        let m = Coordinate::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);

        let mut east_depth = 0i32;
        for e in (0..self.edges.len()).map(EdgeId) {
            let delta = self.edges[e.0].delta;
            let ecoords = &self.graph.edge(e).coords;
            for (k, w) in ecoords.windows(2).enumerate() {
                if e == seed_edge && k == si {
                    continue;
                }
                let (p1, p2) = (Coordinate::from(w[0]), Coordinate::from(w[1]));
                if segment_crosses_positive_ray(m, p1, p2) {
                    // A downward crossing passes the ray from the edge's
                    // left side to its right.
                    if p2.y < p1.y {
                        east_depth += delta;
                    } else {
                        east_depth -= delta;
                    }
                }
            }
        }

        let delta = self.edges[seed_edge.0].delta;
        let depths = if b.y < a.y {
            // Downward segment: east is the left side.
            (east_depth, east_depth + delta)
        } else {
            // Upward segment: east is the right side.
            (east_depth - delta, east_depth)
        };
        self.edges[seed_edge.0].depths = Some(depths);
        Ok(seed_edge)
    }

    fn find_non_horizontal(&self, comp: &[EdgeId]) -> Option<(EdgeId, usize)> {
        for &e in comp {
            let coords = &self.graph.edge(e).coords;
            for (i, w) in coords.windows(2).enumerate() {
                if w[0].y != w[1].y {
                    return Some((e, i));
                }
            }
        }
        None
    }

    fn propagate_from(&mut self, seeded: EdgeId) -> Result<()> {
        let fwd = self.graph.edge(seeded).forward;
        let d = self.graph.dir_edge(fwd);
        let mut queue = VecDeque::from([d.from, d.to]);
        while let Some(node) = queue.pop_front() {
            for e in self.propagate_node(node)? {
                let fwd = self.graph.edge(e).forward;
                let d = self.graph.dir_edge(fwd);
                queue.push_back(d.from);
                queue.push_back(d.to);
            }
        }
        Ok(())
    }

    /// Directed delta of an outgoing directed edge: right depth minus left
    /// depth as seen along its direction.
    fn directed_delta(&self, de: DirEdgeId) -> i32 {
        let d = self.graph.dir_edge(de);
        if self.graph.edge(d.edge).forward == de {
            self.edges[d.edge.0].delta
        } else {
            -self.edges[d.edge.0].delta
        }
    }

    /// Side depths of a directed edge, as seen along its direction.
    fn side_depths(&self, de: DirEdgeId) -> Option<(i32, i32)> {
        let d = self.graph.dir_edge(de);
        let (l, r) = self.edges[d.edge.0].depths?;
        if self.graph.edge(d.edge).forward == de { Some((l, r)) } else { Some((r, l)) }
    }

    fn set_side_depths(
        &mut self,
        de: DirEdgeId,
        left: i32,
        right: i32,
    ) -> Result<Option<EdgeId>> {
        let d = self.graph.dir_edge(de);
        let edge = d.edge;
        let depths = if self.graph.edge(edge).forward == de {
            (left, right)
        } else {
            (right, left)
        };
        match self.edges[edge.0].depths {
            None => {
                self.edges[edge.0].depths = Some(depths);
                Ok(Some(edge))
            }
            Some(existing) if existing == depths => Ok(None),
            Some(_) => {
                let at = Coordinate::from(self.graph.node(d.from).coord);
                Err(TopologyError::at("assigned depths do not match", at))
            }
        }
    }

    /// Spread depths around one node's star.  The sector between two
    /// angularly adjacent outgoing edges is a single region, so the left
    /// depth of each star edge equals the right depth of its CCW successor.
    ///
    /// Returns the edges assigned for the first time.
    fn propagate_node(&mut self, node: NodeId) -> Result<Vec<EdgeId>> {
        let star: Vec<DirEdgeId> = self.graph.star(node).to_vec();
        let k = star.len();
        let Some(start) = star.iter().position(|&de| self.side_depths(de).is_some()) else {
            return Ok(Vec::new());
        };
        let mut newly = Vec::new();
        // Closure around the full star re-derives the starting edge, which
        // doubles as the consistency check.
        let Some((mut prev_left, _)) = self.side_depths(star[start]) else {
            return Ok(Vec::new());
        };
        for step in 1..=k {
            let de = star[(start + step) % k];
            let right = prev_left;
            let left = right - self.directed_delta(de);
            if let Some(e) = self.set_side_depths(de, left, right)? {
                newly.push(e);
            }
            prev_left = left;
        }
        Ok(newly)
    }

    // -----------------------------------------------------------------------
    // Result extraction
    // -----------------------------------------------------------------------

    /// Mark the directed edges bounding the covered region: depth at least
    /// one on the right, at most zero on the left.
    pub fn mark_in_result(&mut self) {
        for id in 0..self.dirs.len() {
            if let Some((l, r)) = self.side_depths(DirEdgeId(id)) {
                self.dirs[id].in_result = r >= 1 && l <= 0;
            }
        }
    }

    pub fn in_result(&self, de: DirEdgeId) -> bool {
        self.dirs[de.0].in_result
    }

    /// Link each in-result directed edge to its ring successor.
    ///
    /// For an incoming edge, the successor is the first in-result outgoing
    /// edge counter-clockwise after its sym, which keeps the covered face
    /// on the right throughout the walk.
    pub fn link_result_edges(&mut self) -> Result<()> {
        for node in 0..self.graph.num_nodes() {
            let node = NodeId(node);
            let star: Vec<DirEdgeId> = self.graph.star(node).to_vec();
            let k = star.len();
            for (pos, &out) in star.iter().enumerate() {
                let inc = self.graph.dir_edge(out).sym;
                if !self.dirs[inc.0].in_result {
                    continue;
                }
                let mut next = None;
                for step in 1..k {
                    let cand = star[(pos + step) % k];
                    if self.dirs[cand.0].in_result {
                        next = Some(cand);
                        break;
                    }
                }
                match next {
                    Some(n) => self.dirs[inc.0].next = Some(n),
                    None => {
                        let at = Coordinate::from(self.graph.node(node).coord);
                        return Err(TopologyError::at("unable to link directed edges", at));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk the linked edges into closed rings.
    pub fn extract_rings(&mut self) -> Result<Vec<Vec<Coordinate>>> {
        self.graph.clear_visited();
        let mut rings = Vec::new();
        for id in 0..self.dirs.len() {
            let start = DirEdgeId(id);
            if !self.dirs[id].in_result || self.graph.dir_edge(start).visited {
                continue;
            }
            let mut ring: Vec<Coordinate> = Vec::new();
            let mut cur = start;
            loop {
                if self.graph.dir_edge(cur).visited {
                    let at = ring.last().copied().unwrap_or(Coordinate::new(0.0, 0.0));
                    return Err(TopologyError::at("edge ring crosses itself", at));
                }
                self.graph.dir_edges[cur.0].visited = true;
                for c in self.graph.dir_edge_coords(cur) {
                    let c = Coordinate::from(c);
                    if ring.last() != Some(&c) {
                        ring.push(c);
                    }
                }
                ring.pop();
                cur = self.dirs[cur.0].next.ok_or_else(|| {
                    TopologyError::new("found unlinked directed edge in result")
                })?;
                if cur == start {
                    break;
                }
            }
            if let Some(&first) = ring.first() {
                ring.push(first);
            }
            if ring.len() < 4 {
                let at = ring.first().copied().unwrap_or(Coordinate::new(0.0, 0.0));
                return Err(TopologyError::at("degenerate ring in result", at));
            }
            rings.push(ring);
        }
        Ok(rings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::is_ccw;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn insert_cw_square(g: &mut OverlayGraph, x0: f64, y0: f64, size: f64) {
        // Clockwise, so the covered area is on the right of each edge.
        let pts = [
            c(x0, y0),
            c(x0, y0 + size),
            c(x0 + size, y0 + size),
            c(x0 + size, y0),
            c(x0, y0),
        ];
        for w in pts.windows(2) {
            g.insert_edge(w, Label::area_boundary());
        }
    }

    fn build_rings(g: &mut OverlayGraph) -> Vec<Vec<Coordinate>> {
        g.compute_depths().unwrap();
        g.mark_in_result();
        g.link_result_edges().unwrap();
        g.extract_rings().unwrap()
    }

    #[test]
    fn single_square_produces_one_shell() {
        let mut g = OverlayGraph::new();
        insert_cw_square(&mut g, 0.0, 0.0, 10.0);
        let rings = build_rings(&mut g);
        assert_eq!(rings.len(), 1);
        assert!(!is_ccw(&rings[0]), "shells come out clockwise");
        assert_eq!(rings[0].len(), 5);
    }

    #[test]
    fn coincident_curves_merge_and_deepen() {
        let mut g = OverlayGraph::new();
        insert_cw_square(&mut g, 0.0, 0.0, 10.0);
        insert_cw_square(&mut g, 0.0, 0.0, 10.0);
        assert_eq!(g.num_edges(), 4);
        // Doubled coverage still yields a single boundary ring.
        let rings = build_rings(&mut g);
        assert_eq!(rings.len(), 1);
    }

    #[test]
    fn disjoint_squares_produce_two_shells() {
        let mut g = OverlayGraph::new();
        insert_cw_square(&mut g, 0.0, 0.0, 10.0);
        insert_cw_square(&mut g, 100.0, 0.0, 10.0);
        let rings = build_rings(&mut g);
        assert_eq!(rings.len(), 2);
    }

    #[test]
    fn component_nested_in_covered_area_is_suppressed() {
        let mut g = OverlayGraph::new();
        insert_cw_square(&mut g, 0.0, 0.0, 10.0);
        // A second boundary entirely inside the first's covered area; it
        // separates depth 1 from depth 2 and bounds nothing.
        insert_cw_square(&mut g, 2.0, 2.0, 6.0);
        let rings = build_rings(&mut g);
        assert_eq!(rings.len(), 1);
        assert!(rings[0].contains(&c(0.0, 0.0)));
        assert!(!rings[0].contains(&c(2.0, 2.0)));
    }

    #[test]
    fn opposite_windings_cancel() {
        let mut g = OverlayGraph::new();
        insert_cw_square(&mut g, 0.0, 0.0, 10.0);
        // The same square inserted counter-clockwise.
        let pts = [
            c(0.0, 0.0),
            c(10.0, 0.0),
            c(10.0, 10.0),
            c(0.0, 10.0),
            c(0.0, 0.0),
        ];
        for w in pts.windows(2) {
            g.insert_edge(w, Label::area_boundary());
        }
        g.compute_depths().unwrap();
        g.mark_in_result();
        // Depth is zero on both sides everywhere, so nothing is in the
        // result.
        for id in 0..g.dirs.len() {
            assert!(!g.in_result(DirEdgeId(id)));
        }
    }
}
