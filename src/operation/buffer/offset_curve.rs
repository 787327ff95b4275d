//! Raw offset curve construction.
//!
//! Generates the closed curves at a fixed distance from points, lines and
//! rings.  Curves are emitted so that the buffered area lies to the right
//! of the direction of travel; convex vertices get circular-arc fillets,
//! concave vertices the intersection of the adjacent offset segments.

use std::f64::consts::PI;

use crate::algorithm::{LineIntersector, orientation};
use crate::geom::{Coordinate, PrecisionModel};
use crate::geomgraph::Position;

use super::params::{BufferParams, CapStyle};

const CLOCKWISE: i32 = -1;
const COUNTERCLOCKWISE: i32 = 1;

pub struct OffsetCurveBuilder {
    precision: PrecisionModel,
    params: BufferParams,
    /// Angular step of fillet arcs.
    fillet_quantum: f64,
    li: LineIntersector,

    distance: f64,
    side: Position,
    pts: Vec<Coordinate>,
    s0: Coordinate,
    s1: Coordinate,
    s2: Coordinate,
}

impl OffsetCurveBuilder {
    pub fn new(precision: PrecisionModel, params: BufferParams) -> Self {
        Self {
            precision,
            params,
            fillet_quantum: (PI / 2.0) / params.quadrant_segments as f64,
            li: LineIntersector::new(),
            distance: 0.0,
            side: Position::Left,
            pts: Vec::new(),
            s0: Coordinate::new(0.0, 0.0),
            s1: Coordinate::new(0.0, 0.0),
            s2: Coordinate::new(0.0, 0.0),
        }
    }

    /// The closed curve at `distance` around a single point.
    pub fn point_curve(&mut self, center: Coordinate, distance: f64) -> Option<Vec<Coordinate>> {
        self.init(distance);
        if distance <= 0.0 {
            return None;
        }
        self.add_pt(Coordinate::new(center.x + distance, center.y));
        self.add_fillet_angles(center, 2.0 * PI, 0.0, CLOCKWISE, distance);
        self.close();
        self.take_curve()
    }

    /// The closed curve at `distance` around a line, end caps included.
    /// `pts` must be free of repeated consecutive points.
    pub fn line_curve(&mut self, pts: &[Coordinate], distance: f64) -> Option<Vec<Coordinate>> {
        self.init(distance);
        if distance <= 0.0 {
            return None;
        }
        match pts {
            [] => return None,
            &[p] => return self.point_curve(p, distance),
            _ => {}
        }
        let n = pts.len() - 1;

        // Left-side offset of the forward traversal.
        self.init_side(pts[0], pts[1], Position::Left);
        for &p in &pts[2..=n] {
            self.add_next_segment(p, true);
        }
        self.add_last_segment();
        self.add_line_end_cap(pts[n - 1], pts[n]);

        // Left-side offset of the reverse traversal, which is the right
        // side of the line.
        self.init_side(pts[n], pts[n - 1], Position::Left);
        for i in (0..n.saturating_sub(1)).rev() {
            self.add_next_segment(pts[i], true);
        }
        self.add_last_segment();
        self.add_line_end_cap(pts[1], pts[0]);

        self.close();
        self.take_curve()
    }

    /// The offset curve of a closed ring on one side.  `pts` must be closed
    /// and free of repeated consecutive points.
    pub fn ring_curve(
        &mut self,
        pts: &[Coordinate],
        side: Position,
        distance: f64,
    ) -> Option<Vec<Coordinate>> {
        self.init(distance);
        if distance == 0.0 {
            return Some(pts.to_vec());
        }
        if pts.len() < 4 {
            return None;
        }
        let n = pts.len() - 1;
        self.init_side(pts[n - 1], pts[0], side);
        for i in 1..=n {
            self.add_next_segment(pts[i], false);
        }
        self.close();
        self.take_curve()
    }

    // -----------------------------------------------------------------------

    fn init(&mut self, distance: f64) {
        self.distance = distance;
        self.pts.clear();
    }

    fn init_side(&mut self, s1: Coordinate, s2: Coordinate, side: Position) {
        self.side = side;
        self.s1 = s1;
        self.s2 = s2;
    }

    fn take_curve(&mut self) -> Option<Vec<Coordinate>> {
        if self.pts.len() < 4 {
            return None;
        }
        Some(std::mem::take(&mut self.pts))
    }

    fn add_pt(&mut self, p: Coordinate) {
        let p = self.precision.make_precise(p);
        if self.pts.last() != Some(&p) {
            self.pts.push(p);
        }
    }

    fn close(&mut self) {
        if let Some(&first) = self.pts.first() {
            if self.pts.last() != Some(&first) {
                self.pts.push(first);
            }
        }
    }

    fn offset_segment(&self, a: Coordinate, b: Coordinate) -> (Coordinate, Coordinate) {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len = (dx * dx + dy * dy).sqrt();
        // Unit normal on the working side.
        let (ux, uy) = match self.side {
            Position::Right => (dy / len, -dx / len),
            _ => (-dy / len, dx / len),
        };
        let ox = ux * self.distance;
        let oy = uy * self.distance;
        (
            Coordinate::new(a.x + ox, a.y + oy),
            Coordinate::new(b.x + ox, b.y + oy),
        )
    }

    fn add_next_segment(&mut self, p: Coordinate, add_start_point: bool) {
        self.s0 = self.s1;
        self.s1 = self.s2;
        self.s2 = p;
        if self.s1 == self.s2 {
            return;
        }
        let offset0 = self.offset_segment(self.s0, self.s1);
        let offset1 = self.offset_segment(self.s1, self.s2);

        let orient = orientation(self.s0, self.s1, self.s2);
        let outside_turn = (orient == CLOCKWISE && self.side == Position::Left)
            || (orient == COUNTERCLOCKWISE && self.side == Position::Right);

        if orient == 0 {
            // Collinear: a straight continuation needs no extra points, a
            // reversal sweeps a half-circle fillet around the vertex.
            let dot = (self.s1.x - self.s0.x) * (self.s2.x - self.s1.x)
                + (self.s1.y - self.s0.y) * (self.s2.y - self.s1.y);
            if dot < 0.0 {
                let dir = if self.side == Position::Left { CLOCKWISE } else { COUNTERCLOCKWISE };
                self.add_pt(offset0.1);
                self.add_fillet_between(self.s1, offset0.1, offset1.0, dir);
                self.add_pt(offset1.0);
            } else {
                self.add_pt(offset0.1);
            }
        } else if outside_turn {
            if add_start_point {
                self.add_pt(offset0.1);
            }
            self.add_fillet_between(self.s1, offset0.1, offset1.0, orient);
            self.add_pt(offset1.0);
        } else {
            // Inside turn: the offset segments cross; their intersection is
            // the single curve vertex.
            self.li.compute(offset0.0, offset0.1, offset1.0, offset1.1);
            if self.li.has_intersection() {
                let p = self.li.pts[0];
                self.add_pt(p);
            } else {
                // Very acute angles can defeat the intersection; inserting
                // the raw offset points with the vertex between keeps the
                // curve from crossing itself.
                self.add_pt(offset0.1);
                self.add_pt(self.s1);
                self.add_pt(offset1.0);
            }
        }
    }

    fn add_last_segment(&mut self) {
        let offset = self.offset_segment(self.s1, self.s2);
        self.add_pt(offset.1);
    }

    fn add_line_end_cap(&mut self, p0: Coordinate, p1: Coordinate) {
        let saved_side = self.side;
        self.side = Position::Left;
        let offset_l = self.offset_segment(p0, p1);
        self.side = Position::Right;
        let offset_r = self.offset_segment(p0, p1);
        self.side = saved_side;

        let angle = (p1.y - p0.y).atan2(p1.x - p0.x);
        match self.params.cap_style {
            CapStyle::Round => {
                self.add_pt(offset_l.1);
                self.add_fillet_angles(
                    p1,
                    angle + PI / 2.0,
                    angle - PI / 2.0,
                    CLOCKWISE,
                    self.distance,
                );
                self.add_pt(offset_r.1);
            }
            CapStyle::Flat => {
                self.add_pt(offset_l.1);
                self.add_pt(offset_r.1);
            }
            CapStyle::Square => {
                let sx = self.distance * angle.cos();
                let sy = self.distance * angle.sin();
                self.add_pt(Coordinate::new(offset_l.1.x + sx, offset_l.1.y + sy));
                self.add_pt(Coordinate::new(offset_r.1.x + sx, offset_r.1.y + sy));
            }
        }
    }

    /// Arc around `center` from `p0` to `p1` in the given rotation sense.
    fn add_fillet_between(
        &mut self,
        center: Coordinate,
        p0: Coordinate,
        p1: Coordinate,
        direction: i32,
    ) {
        let mut start = (p0.y - center.y).atan2(p0.x - center.x);
        let mut end = (p1.y - center.y).atan2(p1.x - center.x);
        if direction == CLOCKWISE {
            if start <= end {
                start += 2.0 * PI;
            }
        } else if start >= end {
            end += 2.0 * PI;
        }
        self.add_fillet_angles(center, start, end, direction, self.distance.abs());
    }

    fn add_fillet_angles(
        &mut self,
        center: Coordinate,
        start: f64,
        end: f64,
        direction: i32,
        radius: f64,
    ) {
        let dirf = if direction == CLOCKWISE { -1.0 } else { 1.0 };
        let total = (end - start).abs();
        let nsegs = (total / self.fillet_quantum + 0.5) as usize;
        if nsegs < 1 {
            return;
        }
        let inc = total / nsegs as f64;
        for k in 0..nsegs {
            let angle = start + dirf * (k as f64) * inc;
            self.add_pt(Coordinate::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ));
        }
    }
}
