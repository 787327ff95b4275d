use crate::error::GeometryError;

use super::{Coordinate, CoordinateSeq, Geometry, LineString, LinearRing, Polygon, PrecisionModel};

/// Constructs typed geometries, snapping every input coordinate through the
/// factory's precision model and enforcing structural invariants.
///
/// Construct one per precision regime and pass it explicitly; there is no
/// global default instance.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeometryFactory {
    precision: PrecisionModel,
}

impl GeometryFactory {
    pub fn new(precision: PrecisionModel) -> Self {
        Self { precision }
    }

    pub fn floating() -> Self {
        Self { precision: PrecisionModel::Floating }
    }

    pub fn fixed(scale: f64) -> Self {
        Self { precision: PrecisionModel::fixed(scale) }
    }

    pub fn precision(&self) -> PrecisionModel {
        self.precision
    }

    fn snap(&self, coords: CoordinateSeq) -> CoordinateSeq {
        coords.into_iter().map(|c| self.precision.make_precise(c)).collect()
    }

    pub fn point(&self, c: Coordinate) -> Geometry {
        Geometry::Point(self.precision.make_precise(c))
    }

    pub fn line_string(
        &self,
        coords: impl Into<CoordinateSeq>,
    ) -> Result<Geometry, GeometryError> {
        Ok(Geometry::LineString(LineString::new(self.snap(coords.into()))?))
    }

    pub fn linear_ring(
        &self,
        coords: impl Into<CoordinateSeq>,
    ) -> Result<LinearRing, GeometryError> {
        LinearRing::new(self.snap(coords.into()))
    }

    pub fn polygon(
        &self,
        shell: impl Into<CoordinateSeq>,
        holes: Vec<CoordinateSeq>,
    ) -> Result<Geometry, GeometryError> {
        let shell = self.linear_ring(shell.into())?;
        let holes = holes
            .into_iter()
            .map(|h| self.linear_ring(h))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Geometry::Polygon(Polygon::new(shell, holes)))
    }

    pub fn multi_point(&self, coords: Vec<Coordinate>) -> Geometry {
        Geometry::MultiPoint(
            coords.into_iter().map(|c| self.precision.make_precise(c)).collect(),
        )
    }

    pub fn multi_line_string(
        &self,
        lines: Vec<CoordinateSeq>,
    ) -> Result<Geometry, GeometryError> {
        let lines = lines
            .into_iter()
            .map(|l| LineString::new(self.snap(l)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Geometry::MultiLineString(lines))
    }

    pub fn multi_polygon(&self, polys: Vec<Polygon>) -> Geometry {
        // Components are assumed to have been built through this factory.
        Geometry::MultiPolygon(polys)
    }

    pub fn collection(&self, geoms: Vec<Geometry>) -> Geometry {
        Geometry::Collection(geoms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_snaps_through_fixed_precision() {
        let gf = GeometryFactory::fixed(1.0);
        let line = gf
            .line_string(vec![(0.1, 0.2), (3.7, 4.4)])
            .unwrap();
        match line {
            Geometry::LineString(l) => {
                assert_eq!(l.coords()[0], Coordinate::new(0.0, 0.0));
                assert_eq!(l.coords()[1], Coordinate::new(4.0, 4.0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn snapping_can_invalidate_a_ring() {
        // Distinct input points collapse onto the unit grid, leaving a
        // 3-point "ring" which the constructor rejects.
        let gf = GeometryFactory::fixed(1.0);
        let res = gf.linear_ring(vec![
            (0.0, 0.0),
            (1.0, 0.0),
            (1.1, 0.1),
            (0.0, 0.0),
        ]);
        // (1.0, 0.0) and (1.1, 0.1) both snap to (1, 0): still 4 stored
        // points, construction succeeds; dedup is a validity concern.
        assert!(res.is_ok());
    }
}
