//! Brute-force noder: tests every segment pair.
//!
//! Quadratic, but with no index overhead and no failure modes; the
//! reference against which the indexed noder is validated.

use crate::algorithm::LineIntersector;
use crate::geom::PrecisionModel;

use super::intersection_adder::add_intersections;
use super::{Noder, SegmentString};

pub struct SimpleNoder {
    precision: PrecisionModel,
}

impl Default for SimpleNoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleNoder {
    pub fn new() -> Self {
        Self { precision: PrecisionModel::Floating }
    }

    pub fn with_precision(pm: PrecisionModel) -> Self {
        Self { precision: pm }
    }
}

impl Noder for SimpleNoder {
    fn node(&mut self, mut strings: Vec<SegmentString>) -> Vec<SegmentString> {
        let mut li = LineIntersector::with_precision(self.precision);
        for i in 0..strings.len() {
            for j in i..strings.len() {
                for si in 0..strings[i].num_segments() {
                    // For a string against itself, start past the diagonal.
                    let sj_start = if i == j { si + 1 } else { 0 };
                    for sj in sj_start..strings[j].num_segments() {
                        add_intersections(&mut strings, i, si, j, sj, &mut li);
                    }
                }
            }
        }
        strings.iter().flat_map(SegmentString::split).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Coordinate;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn s(pts: &[(f64, f64)]) -> SegmentString {
        SegmentString::new(pts.iter().map(|&(x, y)| c(x, y)).collect(), 0)
    }

    #[test]
    fn crossing_lines_split_into_four() {
        let mut noder = SimpleNoder::new();
        let out = noder.node(vec![
            s(&[(0.0, 0.0), (10.0, 10.0)]),
            s(&[(0.0, 10.0), (10.0, 0.0)]),
        ]);
        assert_eq!(out.len(), 4);
        for piece in &out {
            assert!(
                piece.coords().contains(&c(5.0, 5.0)),
                "every piece ends at the crossing"
            );
        }
    }

    #[test]
    fn touching_endpoints_produce_no_extra_nodes() {
        let mut noder = SimpleNoder::new();
        let out = noder.node(vec![
            s(&[(0.0, 0.0), (5.0, 0.0)]),
            s(&[(5.0, 0.0), (10.0, 5.0)]),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn self_intersecting_string_is_noded() {
        let mut noder = SimpleNoder::new();
        // A zigzag crossing itself at (5, 5).
        let out = noder.node(vec![s(&[
            (0.0, 0.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 10.0),
        ])]);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|p| {
            p.coords().first() == Some(&c(5.0, 5.0))
                || p.coords().last() == Some(&c(5.0, 5.0))
                || p.coords().first() == Some(&c(0.0, 0.0))
        }));
    }

    #[test]
    fn t_junction_splits_the_through_line() {
        let mut noder = SimpleNoder::new();
        let out = noder.node(vec![
            s(&[(0.0, 0.0), (10.0, 0.0)]),
            s(&[(5.0, -5.0), (5.0, 0.0)]),
        ]);
        assert_eq!(out.len(), 3);
    }
}
