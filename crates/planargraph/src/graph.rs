//! The planar graph proper: flat arenas of nodes, edges and directed edges
//! addressed by strongly-typed index wrappers, with a coordinate-keyed node
//! map for endpoint lookup.

use std::fmt;

use ahash::AHashMap;
use geo::Coord;

use crate::quadrant::{compare_direction, quadrant};

// ---------------------------------------------------------------------------
// Index types
// ---------------------------------------------------------------------------

macro_rules! idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

idx!(NodeId);
idx!(EdgeId);
idx!(DirEdgeId);

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A node: a coordinate where zero or more edges meet, plus the star of
/// outgoing directed edges sorted counter-clockwise by angle.
#[derive(Clone, Debug)]
pub struct Node {
    pub coord: Coord<f64>,
    /// Outgoing directed edges in CCW order from the positive x-axis.
    pub out: Vec<DirEdgeId>,
}

/// An undirected edge: the coordinate chain of a polyline whose interior
/// crosses no other edge, plus its two directed views.
#[derive(Clone, Debug)]
pub struct Edge {
    pub coords: Vec<Coord<f64>>,
    /// Directed edge running in coordinate order.
    pub forward: DirEdgeId,
    /// Directed edge running in reverse coordinate order.
    pub reverse: DirEdgeId,
    /// Logically removed from the graph.
    pub marked: bool,
}

/// One direction of an edge.  `dir_pt` is the first coordinate after the
/// origin along this direction; it determines the edge's angular position
/// in the origin node's star.
#[derive(Clone, Debug)]
pub struct DirectedEdge {
    pub edge: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub dir_pt: Coord<f64>,
    pub sym: DirEdgeId,
    pub quadrant: u8,
    pub marked: bool,
    pub visited: bool,
}

// ---------------------------------------------------------------------------
// PlanarGraph
// ---------------------------------------------------------------------------

/// A planar graph over fully-noded polylines.
#[derive(Clone, Debug, Default)]
pub struct PlanarGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub dir_edges: Vec<DirectedEdge>,
    node_map: AHashMap<(u64, u64), NodeId>,
}

fn coord_key(c: Coord<f64>) -> (u64, u64) {
    (c.x.to_bits(), c.y.to_bits())
}

impl PlanarGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn dir_edge(&self, id: DirEdgeId) -> &DirectedEdge {
        &self.dir_edges[id.0]
    }

    /// Look up the node at `coord`, if one exists.
    pub fn find_node(&self, coord: Coord<f64>) -> Option<NodeId> {
        self.node_map.get(&coord_key(coord)).copied()
    }

    /// Look up or create the node at `coord`.
    pub fn add_node(&mut self, coord: Coord<f64>) -> NodeId {
        if let Some(&id) = self.node_map.get(&coord_key(coord)) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { coord, out: Vec::new() });
        self.node_map.insert(coord_key(coord), id);
        id
    }

    /// Insert a polyline as an edge.  `coords` must have at least two
    /// coordinates and no repeated consecutive points.
    ///
    /// Creates both directed edges and inserts each into its origin node's
    /// star in CCW angular order (ties broken by arena id, so insertion is
    /// deterministic).
    pub fn add_edge(&mut self, coords: Vec<Coord<f64>>) -> EdgeId {
        assert!(coords.len() >= 2, "edge must have at least 2 coordinates");
        let n = coords.len();
        let from = self.add_node(coords[0]);
        let to = self.add_node(coords[n - 1]);

        let edge_id = EdgeId(self.edges.len());
        let fwd = DirEdgeId(self.dir_edges.len());
        let rev = DirEdgeId(self.dir_edges.len() + 1);

        self.dir_edges.push(DirectedEdge {
            edge: edge_id,
            from,
            to,
            dir_pt: coords[1],
            sym: rev,
            quadrant: quadrant(coords[1].x - coords[0].x, coords[1].y - coords[0].y),
            marked: false,
            visited: false,
        });
        self.dir_edges.push(DirectedEdge {
            edge: edge_id,
            from: to,
            to: from,
            dir_pt: coords[n - 2],
            sym: fwd,
            quadrant: quadrant(
                coords[n - 2].x - coords[n - 1].x,
                coords[n - 2].y - coords[n - 1].y,
            ),
            marked: false,
            visited: false,
        });

        self.edges.push(Edge { coords, forward: fwd, reverse: rev, marked: false });

        self.insert_into_star(from, fwd);
        self.insert_into_star(to, rev);
        edge_id
    }

    fn insert_into_star(&mut self, node: NodeId, de: DirEdgeId) {
        let origin = self.nodes[node.0].coord;
        let dir_pt = self.dir_edges[de.0].dir_pt;
        let star = &self.nodes[node.0].out;
        let pos = star.partition_point(|&other| {
            let other_pt = self.dir_edges[other.0].dir_pt;
            match compare_direction(origin, other_pt, dir_pt) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Equal => other < de,
                std::cmp::Ordering::Greater => false,
            }
        });
        self.nodes[node.0].out.insert(pos, de);
    }

    /// Number of unmarked edges leaving `node`.
    pub fn degree(&self, node: NodeId) -> usize {
        self.nodes[node.0]
            .out
            .iter()
            .filter(|&&de| !self.dir_edges[de.0].marked)
            .count()
    }

    /// Outgoing directed edges of `node` in CCW order (marked edges included).
    pub fn star(&self, node: NodeId) -> &[DirEdgeId] {
        &self.nodes[node.0].out
    }

    /// Mark an edge and both of its directed edges as removed.
    pub fn mark_edge(&mut self, edge: EdgeId) {
        let (fwd, rev) = {
            let e = &mut self.edges[edge.0];
            e.marked = true;
            (e.forward, e.reverse)
        };
        self.dir_edges[fwd.0].marked = true;
        self.dir_edges[rev.0].marked = true;
    }

    /// Coordinates of an edge, oriented in the direction of `de`.
    pub fn dir_edge_coords(&self, de: DirEdgeId) -> Vec<Coord<f64>> {
        let d = &self.dir_edges[de.0];
        let mut coords = self.edges[d.edge.0].coords.clone();
        if self.edges[d.edge.0].forward != de {
            coords.reverse();
        }
        coords
    }

    /// Clear all visited flags.
    pub fn clear_visited(&mut self) {
        for de in &mut self.dir_edges {
            de.visited = false;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
