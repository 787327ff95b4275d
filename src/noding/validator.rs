//! Validation of noding output.
//!
//! A fully noded arrangement has no interior intersections left: segments
//! may share endpoints, nothing more.  The validator brute-forces every
//! segment pair, so it is for testing and debugging, not production paths.

use crate::algorithm::{IntersectionKind, LineIntersector};
use crate::error::TopologyError;

use super::SegmentString;

pub struct NodingValidator<'a> {
    strings: &'a [SegmentString],
}

impl<'a> NodingValidator<'a> {
    pub fn new(strings: &'a [SegmentString]) -> Self {
        Self { strings }
    }

    pub fn check_valid(&self) -> Result<(), TopologyError> {
        let mut li = LineIntersector::new();
        for i in 0..self.strings.len() {
            for j in i..self.strings.len() {
                self.check_pair(i, j, &mut li)?;
            }
        }
        Ok(())
    }

    fn check_pair(
        &self,
        i: usize,
        j: usize,
        li: &mut LineIntersector,
    ) -> Result<(), TopologyError> {
        let a = self.strings[i].coords();
        let b = self.strings[j].coords();
        for si in 0..a.len().saturating_sub(1) {
            let sj_start = if i == j { si + 1 } else { 0 };
            for sj in sj_start..b.len().saturating_sub(1) {
                if i == j && sj == si {
                    continue;
                }
                let (p1, p2) = (a[si], a[si + 1]);
                let (q1, q2) = (b[sj], b[sj + 1]);
                li.compute(p1, p2, q1, q2);
                if !li.has_intersection() {
                    continue;
                }
                if li.proper {
                    return Err(TopologyError::at(
                        "found non-noded intersection",
                        li.pts[0],
                    ));
                }
                if li.kind == IntersectionKind::Collinear {
                    return Err(TopologyError::at(
                        "found overlapping segments",
                        li.pts[0],
                    ));
                }
                // A non-proper point is fine only if it is an endpoint of
                // both segments.
                let p = li.pts[0];
                let endpoint_of_a = p == p1 || p == p2;
                let endpoint_of_b = p == q1 || p == q2;
                if !(endpoint_of_a && endpoint_of_b) {
                    return Err(TopologyError::at(
                        "found intersection interior to a segment",
                        p,
                    ));
                }
            }
        }
        Ok(())
    }
}
