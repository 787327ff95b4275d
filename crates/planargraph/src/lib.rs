//! A self-contained planar graph for line networks.
//!
//! Nodes live at shared endpoint coordinates; every undirected edge carries
//! the coordinate chain of the underlying polyline and is represented by a
//! pair of directed edges (each other's `sym`).  Each node keeps its
//! outgoing directed edges sorted counter-clockwise by angle, which is the
//! property ring-walking algorithms (polygonization, face traversal) rely
//! on.
//!
//! Inputs are expected to be fully noded: edges may share endpoints but
//! must not cross in their interiors.

pub mod graph;
pub mod quadrant;

pub use graph::{DirEdgeId, DirectedEdge, Edge, EdgeId, Node, NodeId, PlanarGraph};
pub use quadrant::{compare_direction, quadrant};
