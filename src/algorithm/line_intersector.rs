//! Robust segment-segment intersection.
//!
//! Orientation decisions use exact predicates; the intersection point
//! itself is computed on inputs translated to a local origin, which keeps
//! the (inexact) arithmetic well-conditioned for segments far from the
//! global origin.

use crate::geom::{Coordinate, Envelope, PrecisionModel};

use super::predicates::orientation;

/// Classification of a segment pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntersectionKind {
    None,
    /// The segments meet in a single point.
    Point,
    /// The segments overlap along a collinear sub-segment.
    Collinear,
}

/// Computes and holds the intersection of one segment pair at a time.
#[derive(Clone, Debug)]
pub struct LineIntersector {
    pub kind: IntersectionKind,
    /// Intersection coordinates; `pts[0]` is valid for `Point`, both for
    /// `Collinear`.
    pub pts: [Coordinate; 2],
    /// True if the intersection point is interior to both segments.
    pub proper: bool,
    precision: PrecisionModel,
}

impl Default for LineIntersector {
    fn default() -> Self {
        Self::new()
    }
}

impl LineIntersector {
    pub fn new() -> Self {
        Self {
            kind: IntersectionKind::None,
            pts: [Coordinate::new(0.0, 0.0); 2],
            proper: false,
            precision: PrecisionModel::Floating,
        }
    }

    /// Snap computed intersection points through `pm`.
    pub fn with_precision(pm: PrecisionModel) -> Self {
        Self { precision: pm, ..Self::new() }
    }

    pub fn has_intersection(&self) -> bool {
        self.kind != IntersectionKind::None
    }

    pub fn num_points(&self) -> usize {
        match self.kind {
            IntersectionKind::None => 0,
            IntersectionKind::Point => 1,
            IntersectionKind::Collinear => 2,
        }
    }

    /// Compute the intersection of segments `p1-p2` and `q1-q2`.
    pub fn compute(
        &mut self,
        p1: Coordinate,
        p2: Coordinate,
        q1: Coordinate,
        q2: Coordinate,
    ) {
        self.proper = false;
        self.kind = self.compute_kind(p1, p2, q1, q2);
    }

    fn compute_kind(
        &mut self,
        p1: Coordinate,
        p2: Coordinate,
        q1: Coordinate,
        q2: Coordinate,
    ) -> IntersectionKind {
        // Envelope pruning.
        if !Envelope::of(p1, p2).intersects(&Envelope::of(q1, q2)) {
            return IntersectionKind::None;
        }

        let pq1 = orientation(p1, p2, q1);
        let pq2 = orientation(p1, p2, q2);
        if (pq1 > 0 && pq2 > 0) || (pq1 < 0 && pq2 < 0) {
            return IntersectionKind::None;
        }

        let qp1 = orientation(q1, q2, p1);
        let qp2 = orientation(q1, q2, p2);
        if (qp1 > 0 && qp2 > 0) || (qp1 < 0 && qp2 < 0) {
            return IntersectionKind::None;
        }

        if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
            return self.collinear_intersection(p1, p2, q1, q2);
        }

        if pq1 == 0 || pq2 == 0 || qp1 == 0 || qp2 == 0 {
            // An endpoint of one segment lies on the other.
            self.pts[0] = if p1 == q1 || p1 == q2 {
                p1
            } else if p2 == q1 || p2 == q2 {
                p2
            } else if pq1 == 0 {
                q1
            } else if pq2 == 0 {
                q2
            } else if qp1 == 0 {
                p1
            } else {
                p2
            };
            return IntersectionKind::Point;
        }

        self.proper = true;
        self.pts[0] = self.precision.make_precise(intersection_point(p1, p2, q1, q2));
        IntersectionKind::Point
    }

    fn collinear_intersection(
        &mut self,
        p1: Coordinate,
        p2: Coordinate,
        q1: Coordinate,
        q2: Coordinate,
    ) -> IntersectionKind {
        let p_env = Envelope::of(p1, p2);
        let q_env = Envelope::of(q1, q2);
        let q1_in_p = p_env.contains_coord(q1);
        let q2_in_p = p_env.contains_coord(q2);
        let p1_in_q = q_env.contains_coord(p1);
        let p2_in_q = q_env.contains_coord(p2);

        if q1_in_p && q2_in_p {
            self.pts = [q1, q2];
            return IntersectionKind::Collinear;
        }
        if p1_in_q && p2_in_q {
            self.pts = [p1, p2];
            return IntersectionKind::Collinear;
        }
        for (a, b, a_in, b_in) in [
            (q1, p1, q1_in_p, p1_in_q),
            (q1, p2, q1_in_p, p2_in_q),
            (q2, p1, q2_in_p, p1_in_q),
            (q2, p2, q2_in_p, p2_in_q),
        ] {
            if a_in && b_in {
                self.pts = [a, b];
                return if a == b { IntersectionKind::Point } else { IntersectionKind::Collinear };
            }
        }
        IntersectionKind::None
    }
}

/// Intersection point of two properly-crossing segments, computed on
/// inputs translated near the origin.
fn intersection_point(
    p1: Coordinate,
    p2: Coordinate,
    q1: Coordinate,
    q2: Coordinate,
) -> Coordinate {
    // Translate by the centre of the envelope overlap.
    let p_env = Envelope::of(p1, p2);
    let q_env = Envelope::of(q1, q2);
    let ox = (p_env.min_x.max(q_env.min_x) + p_env.max_x.min(q_env.max_x)) / 2.0;
    let oy = (p_env.min_y.max(q_env.min_y) + p_env.max_y.min(q_env.max_y)) / 2.0;

    let t = |c: Coordinate| (c.x - ox, c.y - oy);
    let (x1, y1) = t(p1);
    let (x2, y2) = t(p2);
    let (x3, y3) = t(q1);
    let (x4, y4) = t(q2);

    // Line through (x1,y1)-(x2,y2): A1 x + B1 y = C1, and similarly for q.
    let a1 = y2 - y1;
    let b1 = x1 - x2;
    let c1 = x1 * y2 - x2 * y1;
    let a2 = y4 - y3;
    let b2 = x3 - x4;
    let c2 = x3 * y4 - x4 * y3;

    let den = a1 * b2 - a2 * b1;
    let x = (c1 * b2 - c2 * b1) / den + ox;
    let y = (a1 * c2 - a2 * c1) / den + oy;
    let pt = Coordinate::new(x, y);

    // Guard against conditioning failures: the point must land inside both
    // segment envelopes; otherwise fall back to the nearest endpoint.
    if Envelope::of(p1, p2).contains_coord(pt) && Envelope::of(q1, q2).contains_coord(pt) {
        return pt;
    }
    let mut best = p1;
    for cand in [p2, q1, q2] {
        if cand.distance(&pt).total_cmp(&best.distance(&pt)).is_lt() {
            best = cand;
        }
    }
    best
}
