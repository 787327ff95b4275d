//! Monotone chains: maximal runs of segments whose direction stays within
//! one quadrant.
//!
//! Monotonicity gives two pruning properties: the envelope of any sub-chain
//! is just the envelope of its end points, and a chain never intersects
//! itself.  Segment queries against a chain therefore subdivide by halves
//! on end-point envelopes instead of testing every member segment.

use crate::geom::{Coordinate, Envelope};

fn quadrant(dx: f64, dy: f64) -> u8 {
    if dx >= 0.0 {
        if dy >= 0.0 { 0 } else { 3 }
    } else if dy >= 0.0 {
        1
    } else {
        2
    }
}

/// A maximal monotone run of segments within one parent coordinate list.
/// Holds index ranges only; coordinates stay with the parent.
#[derive(Clone, Copy, Debug)]
pub struct MonotoneChain {
    /// Caller-defined id of the parent coordinate list.
    pub parent: usize,
    /// First coordinate index of the chain.
    pub start: usize,
    /// Last coordinate index of the chain (inclusive); segments are
    /// `start..end`.
    pub end: usize,
    pub env: Envelope,
}

impl MonotoneChain {
    /// Visit every segment (by start-coordinate index) whose envelope
    /// overlaps `search`.
    pub fn select(
        &self,
        coords: &[Coordinate],
        search: &Envelope,
        f: &mut impl FnMut(usize),
    ) {
        self.select_range(coords, search, self.start, self.end, f);
    }

    fn select_range(
        &self,
        coords: &[Coordinate],
        search: &Envelope,
        start: usize,
        end: usize,
        f: &mut impl FnMut(usize),
    ) {
        if end - start == 1 {
            if search.intersects(&Envelope::of(coords[start], coords[end])) {
                f(start);
            }
            return;
        }
        if !search.intersects(&Envelope::of(coords[start], coords[end])) {
            return;
        }
        let mid = (start + end) / 2;
        if start < mid {
            self.select_range(coords, search, start, mid, f);
        }
        if mid < end {
            self.select_range(coords, search, mid, end, f);
        }
    }

    /// Visit every segment-index pair of `(self, other)` whose segment
    /// envelopes overlap.
    pub fn overlaps(
        &self,
        coords: &[Coordinate],
        other: &MonotoneChain,
        other_coords: &[Coordinate],
        f: &mut impl FnMut(usize, usize),
    ) {
        overlap_range(
            coords,
            self.start,
            self.end,
            other_coords,
            other.start,
            other.end,
            f,
        );
    }
}

fn overlap_range(
    a: &[Coordinate],
    a0: usize,
    a1: usize,
    b: &[Coordinate],
    b0: usize,
    b1: usize,
    f: &mut impl FnMut(usize, usize),
) {
    if a1 - a0 == 1 && b1 - b0 == 1 {
        f(a0, b0);
        return;
    }
    if !Envelope::of(a[a0], a[a1]).intersects(&Envelope::of(b[b0], b[b1])) {
        return;
    }
    let am = (a0 + a1) / 2;
    let bm = (b0 + b1) / 2;
    if a0 < am {
        if b0 < bm {
            overlap_range(a, a0, am, b, b0, bm, f);
        }
        if bm < b1 {
            overlap_range(a, a0, am, b, bm, b1, f);
        }
    }
    if am < a1 {
        if b0 < bm {
            overlap_range(a, am, a1, b, b0, bm, f);
        }
        if bm < b1 {
            overlap_range(a, am, a1, b, bm, b1, f);
        }
    }
}

/// Decompose a coordinate list into maximal monotone chains.
pub fn build_chains(coords: &[Coordinate], parent: usize) -> Vec<MonotoneChain> {
    let mut chains = Vec::new();
    if coords.len() < 2 {
        return chains;
    }
    let mut start = 0;
    while start < coords.len() - 1 {
        let end = find_chain_end(coords, start);
        let env = Envelope::from_coords(coords[start..=end].iter());
        chains.push(MonotoneChain { parent, start, end, env });
        start = end;
    }
    chains
}

fn find_chain_end(coords: &[Coordinate], start: usize) -> usize {
    // Skip any leading repeated points.
    let mut safe_start = start;
    while safe_start < coords.len() - 1 && coords[safe_start] == coords[safe_start + 1] {
        safe_start += 1;
    }
    if safe_start >= coords.len() - 1 {
        return coords.len() - 1;
    }
    let chain_quad = quadrant(
        coords[safe_start + 1].x - coords[safe_start].x,
        coords[safe_start + 1].y - coords[safe_start].y,
    );
    let mut last = safe_start + 1;
    while last < coords.len() - 1 {
        let (p, q) = (coords[last], coords[last + 1]);
        if p == q {
            break;
        }
        if quadrant(q.x - p.x, q.y - p.y) != chain_quad {
            break;
        }
        last += 1;
    }
    last
}
