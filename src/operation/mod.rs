//! Geometry operations.

pub mod buffer;
pub mod linemerge;
pub mod polygonize;
pub mod valid;

pub use buffer::{BufferOp, BufferParams, CapStyle};
pub use linemerge::LineMerger;
pub use polygonize::Polygonizer;
pub use valid::{check_valid, is_valid, TopologyValidationError, ValidationErrorKind};
