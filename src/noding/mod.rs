//! Noding: replacing a set of possibly-intersecting linework with
//! substrings that meet only at shared endpoints.

mod index_noder;
mod intersection_adder;
mod segment_string;
mod simple_noder;
mod validator;

pub use index_noder::IndexNoder;
pub use segment_string::{SegmentNode, SegmentString};
pub use simple_noder::SimpleNoder;
pub use validator::NodingValidator;

/// A noding strategy over a batch of segment strings.
pub trait Noder {
    /// Node `strings` and return the fully split substrings, each carrying
    /// its parent's `data` id.
    fn node(&mut self, strings: Vec<SegmentString>) -> Vec<SegmentString>;
}
