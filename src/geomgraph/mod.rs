//! Topology graph with side labelling and depth propagation, the substrate
//! for area construction.

mod label;
mod overlay_graph;

pub use label::{Label, Position};
pub use overlay_graph::OverlayGraph;
