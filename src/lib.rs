//! A planar computational-geometry engine: robust predicates, spatial
//! indexes, linework noding, topology graphs with depth labeling, and the
//! operations built on them (buffering, polygonization, line merging,
//! validity checking).
//!
//! The convenience functions at the crate root cover the common cases;
//! the [`operation`] builders expose the knobs.

pub mod algorithm;
pub mod error;
pub mod geom;
pub mod geomgraph;
pub mod index;
pub mod noding;
pub mod operation;
pub mod precision;

#[doc(inline)]
pub use error::{GeometryError, Result, TopologyError};

#[doc(inline)]
pub use geom::{
    Coordinate, CoordinateSeq, Envelope, Geometry, GeometryFactory, LineString, LinearRing,
    Location, Polygon, PrecisionModel,
};

#[doc(inline)]
pub use operation::{
    check_valid, is_valid, BufferOp, BufferParams, CapStyle, LineMerger, Polygonizer,
    TopologyValidationError,
};

#[doc(inline)]
pub use precision::GeometryPrecisionReducer;

use noding::{IndexNoder, Noder, SegmentString};

/// Buffer `geom` by `distance` with default (round, 8 segments per
/// quadrant) parameters.
///
/// Negative distances erode areal geometries and yield nothing for lines
/// and points.
pub fn buffer(geom: &Geometry, distance: f64) -> Result<Geometry> {
    BufferOp::new(geom).result(distance)
}

/// Buffer `geom` by `distance` with explicit end-cap and fillet parameters.
pub fn buffer_with_params(
    geom: &Geometry,
    distance: f64,
    params: BufferParams,
) -> Result<Geometry> {
    BufferOp::with_params(geom, params).result(distance)
}

/// Form the maximal set of polygons bounded by the fully-noded linework of
/// `geom`.  Dangles and cut edges are dropped.
pub fn polygonize(geom: &Geometry) -> Vec<Polygon> {
    let mut p = Polygonizer::new();
    p.add(geom);
    p.polygons().to_vec()
}

/// Sew the fully-noded linework of `geom` into maximal merged lines.
pub fn line_merge(geom: &Geometry) -> Vec<LineString> {
    let mut m = LineMerger::new();
    m.add(geom);
    m.merged_lines().to_vec()
}

/// Node the linework of `geom`: split every line at each point where it
/// crosses or touches another (or itself), so the result lines meet only
/// at endpoints.
pub fn node_lines(geom: &Geometry) -> Vec<LineString> {
    let strings: Vec<SegmentString> = geom
        .lines()
        .iter()
        .enumerate()
        .map(|(i, l)| SegmentString::new(l.as_slice().to_vec(), i))
        .collect();
    IndexNoder::new()
        .node(strings)
        .into_iter()
        .filter_map(|s| {
            LineString::new(CoordinateSeq::from_coords(s.coords().to_vec())).ok()
        })
        .collect()
}
