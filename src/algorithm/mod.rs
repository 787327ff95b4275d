//! Robust geometric predicates and low-level constructions.

pub mod distance;
pub mod line_intersector;
pub mod locate;
pub mod mc_point_in_ring;
pub mod predicates;

pub use distance::{point_segment_distance, segment_segment_distance};
pub use line_intersector::{IntersectionKind, LineIntersector};
pub use locate::{locate, locate_in_polygon, locate_in_ring};
pub use mc_point_in_ring::McPointInRing;
pub use predicates::{is_ccw, on_segment, orientation, point_in_ring, sign_of_det2x2};
