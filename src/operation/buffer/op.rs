//! Buffer entry point with precision fallback.
//!
//! Buffering occasionally fails in full floating precision when offset
//! curves intersect at badly-conditioned angles.  On failure the input is
//! snapped to a fixed grid sized from the buffer's extent, starting at 12
//! significant digits and coarsening one digit per attempt.

use log::warn;

use crate::error::{Result, TopologyError};
use crate::geom::{Geometry, PrecisionModel};
use crate::precision::GeometryPrecisionReducer;

use super::builder::BufferBuilder;
use super::params::BufferParams;

const MAX_PRECISION_DIGITS: i32 = 12;

pub struct BufferOp<'a> {
    geom: &'a Geometry,
    params: BufferParams,
}

impl<'a> BufferOp<'a> {
    pub fn new(geom: &'a Geometry) -> Self {
        Self { geom, params: BufferParams::default() }
    }

    pub fn with_params(geom: &'a Geometry, params: BufferParams) -> Self {
        Self { geom, params }
    }

    pub fn result(&self, distance: f64) -> Result<Geometry> {
        match BufferBuilder::new(self.params, PrecisionModel::Floating)
            .buffer(self.geom, distance)
        {
            Ok(g) => Ok(g),
            Err(first_err) => self.retry_reduced(distance, first_err),
        }
    }

    fn retry_reduced(&self, distance: f64, first_err: TopologyError) -> Result<Geometry> {
        let mut last_err = first_err;
        for digits in (0..=MAX_PRECISION_DIGITS).rev() {
            warn!(
                "buffer attempt failed ({last_err}); retrying at {digits} digits of precision"
            );
            let scale = precision_scale_factor(self.geom, distance, digits);
            let pm = PrecisionModel::fixed(scale);
            let reduced = GeometryPrecisionReducer::new(pm).reduce(self.geom);
            match BufferBuilder::new(self.params, pm).buffer(&reduced, distance) {
                Ok(g) => return Ok(g),
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }
}

/// Grid scale giving roughly `max_precision_digits` significant digits over
/// the buffered extent.
fn precision_scale_factor(
    geom: &Geometry,
    distance: f64,
    max_precision_digits: i32,
) -> f64 {
    let mut env = geom.envelope();
    env.expand_by(distance.max(0.0));
    let buf_env_size = env.width().max(env.height());
    let buf_env_log10 = (buf_env_size.ln() / std::f64::consts::LN_10 + 1.0) as i32;
    let min_unit_log10 = buf_env_log10 - max_precision_digits;
    10f64.powi(-min_unit_log10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Coordinate, GeometryFactory};
    use std::f64::consts::PI;

    #[test]
    fn scale_factor_tracks_extent() {
        let f = GeometryFactory::floating();
        let g = f.point(Coordinate::new(0.0, 0.0));
        // Extent ~200 after expanding by the distance: 3 digits => grid of
        // 1.0.
        let scale = precision_scale_factor(&g, 100.0, 3);
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn buffers_in_floating_precision() {
        let f = GeometryFactory::floating();
        let g = f.point(Coordinate::new(0.0, 0.0));
        let out = BufferOp::new(&g).result(1.0).unwrap();
        assert!(out.area() > 0.98 * PI);
    }
}
