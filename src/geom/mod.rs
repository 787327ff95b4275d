//! The geometry value model: coordinates, sequences, envelopes, the closed
//! `Geometry` variant set, precision models and the constructing factory.

mod convert;
mod coordinate;
mod envelope;
mod factory;
mod geometry;
mod location;
mod precision;
mod sequence;

pub use coordinate::Coordinate;
pub use envelope::Envelope;
pub use factory::GeometryFactory;
pub use geometry::{signed_area, Geometry, LineString, LinearRing, Polygon};
pub use location::Location;
pub use precision::PrecisionModel;
pub use sequence::CoordinateSeq;
