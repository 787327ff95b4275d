//! Buffering: the area within a given distance of a geometry.

mod builder;
mod curve_set;
mod offset_curve;
mod op;
mod params;

pub use builder::BufferBuilder;
pub use offset_curve::OffsetCurveBuilder;
pub use op::BufferOp;
pub use params::{BufferParams, CapStyle};
