//! Conversions to and from `geo-types`, so callers already living in the
//! `geo` ecosystem can hand geometries across the boundary.
//!
//! Conversions copy coordinates (z is dropped going out, `NaN` coming in).
//! `geo` rings are closed on the way in if the source left them open.

use crate::error::GeometryError;

use super::{Coordinate, CoordinateSeq, Geometry, LineString, LinearRing, Polygon};

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Coord { x: c.x, y: c.y }
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(c: geo::Coord<f64>) -> Self {
        Coordinate::new(c.x, c.y)
    }
}

fn seq_from_geo(ls: &geo::LineString<f64>) -> CoordinateSeq {
    ls.0.iter().map(|&c| Coordinate::from(c)).collect()
}

fn ring_from_geo(ls: &geo::LineString<f64>) -> Result<LinearRing, GeometryError> {
    let mut seq = seq_from_geo(ls);
    seq.close_ring();
    LinearRing::new(seq)
}

fn polygon_from_geo(p: &geo::Polygon<f64>) -> Result<Polygon, GeometryError> {
    let shell = ring_from_geo(p.exterior())?;
    let holes = p
        .interiors()
        .iter()
        .map(ring_from_geo)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(shell, holes))
}

impl TryFrom<&geo::Geometry<f64>> for Geometry {
    type Error = GeometryError;

    fn try_from(g: &geo::Geometry<f64>) -> Result<Self, GeometryError> {
        match g {
            geo::Geometry::Point(p) => Ok(Geometry::Point(Coordinate::new(p.x(), p.y()))),
            geo::Geometry::Line(l) => Ok(Geometry::LineString(LineString::new(
                vec![Coordinate::from(l.start), Coordinate::from(l.end)].into(),
            )?)),
            geo::Geometry::LineString(ls) => {
                Ok(Geometry::LineString(LineString::new(seq_from_geo(ls))?))
            }
            geo::Geometry::Polygon(p) => Ok(Geometry::Polygon(polygon_from_geo(p)?)),
            geo::Geometry::MultiPoint(mp) => Ok(Geometry::MultiPoint(
                mp.0.iter().map(|p| Coordinate::new(p.x(), p.y())).collect(),
            )),
            geo::Geometry::MultiLineString(mls) => Ok(Geometry::MultiLineString(
                mls.0
                    .iter()
                    .map(|ls| LineString::new(seq_from_geo(ls)))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            geo::Geometry::MultiPolygon(mps) => Ok(Geometry::MultiPolygon(
                mps.0
                    .iter()
                    .map(polygon_from_geo)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            geo::Geometry::GeometryCollection(gc) => Ok(Geometry::Collection(
                gc.0.iter()
                    .map(Geometry::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            geo::Geometry::Rect(r) => {
                Ok(Geometry::Polygon(polygon_from_geo(&r.to_polygon())?))
            }
            geo::Geometry::Triangle(t) => {
                Ok(Geometry::Polygon(polygon_from_geo(&t.to_polygon())?))
            }
        }
    }
}

fn seq_to_geo(seq: &CoordinateSeq) -> geo::LineString<f64> {
    geo::LineString(seq.iter().map(|&c| geo::Coord::from(c)).collect())
}

fn polygon_to_geo(p: &Polygon) -> geo::Polygon<f64> {
    geo::Polygon::new(
        seq_to_geo(p.shell.coords()),
        p.holes.iter().map(|h| seq_to_geo(h.coords())).collect(),
    )
}

impl From<&Geometry> for geo::Geometry<f64> {
    fn from(g: &Geometry) -> Self {
        match g {
            Geometry::Point(c) => geo::Geometry::Point(geo::Point::new(c.x, c.y)),
            Geometry::LineString(l) => geo::Geometry::LineString(seq_to_geo(l.coords())),
            Geometry::LinearRing(r) => geo::Geometry::LineString(seq_to_geo(r.coords())),
            Geometry::Polygon(p) => geo::Geometry::Polygon(polygon_to_geo(p)),
            Geometry::MultiPoint(pts) => geo::Geometry::MultiPoint(geo::MultiPoint(
                pts.iter().map(|c| geo::Point::new(c.x, c.y)).collect(),
            )),
            Geometry::MultiLineString(ls) => geo::Geometry::MultiLineString(
                geo::MultiLineString(ls.iter().map(|l| seq_to_geo(l.coords())).collect()),
            ),
            Geometry::MultiPolygon(ps) => geo::Geometry::MultiPolygon(geo::MultiPolygon(
                ps.iter().map(polygon_to_geo).collect(),
            )),
            Geometry::Collection(gs) => geo::Geometry::GeometryCollection(
                geo::GeometryCollection(gs.iter().map(geo::Geometry::from).collect()),
            ),
        }
    }
}
