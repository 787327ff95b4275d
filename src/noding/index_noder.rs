//! Indexed noder: monotone chains plus an R-tree over chain envelopes.
//!
//! Candidate pairs come from envelope overlap queries; only overlapping
//! chain pairs recurse down to segment-level intersection tests.

use rstar::{AABB, RTree, RTreeObject};

use crate::algorithm::LineIntersector;
use crate::geom::PrecisionModel;
use crate::index::{MonotoneChain, build_chains};

use super::intersection_adder::add_intersections;
use super::{Noder, SegmentString};

struct ChainRef {
    idx: usize,
    aabb: AABB<[f64; 2]>,
}

impl RTreeObject for ChainRef {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

pub struct IndexNoder {
    precision: PrecisionModel,
}

impl Default for IndexNoder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexNoder {
    pub fn new() -> Self {
        Self { precision: PrecisionModel::Floating }
    }

    pub fn with_precision(pm: PrecisionModel) -> Self {
        Self { precision: pm }
    }
}

impl Noder for IndexNoder {
    fn node(&mut self, mut strings: Vec<SegmentString>) -> Vec<SegmentString> {
        // Chains reference their parent string through `parent`.
        let mut chains: Vec<MonotoneChain> = Vec::new();
        for (i, s) in strings.iter().enumerate() {
            chains.extend(build_chains(s.coords(), i));
        }

        let tree = RTree::bulk_load(
            chains
                .iter()
                .enumerate()
                .map(|(idx, ch)| ChainRef {
                    idx,
                    aabb: AABB::from_corners(
                        [ch.env.min_x, ch.env.min_y],
                        [ch.env.max_x, ch.env.max_y],
                    ),
                })
                .collect(),
        );

        // Gather candidate segment pairs first; mutation happens after all
        // chain borrows are released.
        let mut pairs: Vec<(usize, usize, usize, usize)> = Vec::new();
        for (a, ca) in chains.iter().enumerate() {
            for hit in tree.locate_in_envelope_intersecting(&AABB::from_corners(
                [ca.env.min_x, ca.env.min_y],
                [ca.env.max_x, ca.env.max_y],
            )) {
                let b = hit.idx;
                // Each unordered pair once; a chain is monotone, so it never
                // intersects itself.
                if b <= a {
                    continue;
                }
                let cb = &chains[b];
                ca.overlaps(
                    strings[ca.parent].coords(),
                    cb,
                    strings[cb.parent].coords(),
                    &mut |si, sj| pairs.push((ca.parent, si, cb.parent, sj)),
                );
            }
        }

        log::debug!(
            "noding {} strings: {} chains, {} candidate segment pairs",
            strings.len(),
            chains.len(),
            pairs.len()
        );

        let mut li = LineIntersector::with_precision(self.precision);
        for (i, si, j, sj) in pairs {
            add_intersections(&mut strings, i, si, j, sj, &mut li);
        }
        strings.iter().flat_map(SegmentString::split).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Coordinate;
    use crate::noding::SimpleNoder;

    fn s(pts: &[(f64, f64)]) -> SegmentString {
        SegmentString::new(
            pts.iter().map(|&(x, y)| Coordinate::new(x, y)).collect(),
            0,
        )
    }

    fn piece_keys(out: &[SegmentString]) -> Vec<Vec<(f64, f64)>> {
        let mut keys: Vec<Vec<(f64, f64)>> = out
            .iter()
            .map(|p| p.coords().iter().map(|c| (c.x, c.y)).collect())
            .collect();
        keys.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        keys
    }

    #[test]
    fn matches_brute_force_on_a_grid_of_crossings() {
        let mut inputs = Vec::new();
        for i in 0..6 {
            let v = i as f64 * 2.0;
            inputs.push(s(&[(v, -1.0), (v, 11.0)]));
            inputs.push(s(&[(-1.0, v), (11.0, v)]));
        }
        let fast = IndexNoder::new().node(inputs.clone());
        let slow = SimpleNoder::new().node(inputs);
        assert_eq!(piece_keys(&fast), piece_keys(&slow));
    }

    #[test]
    fn distant_strings_are_never_paired() {
        let out = IndexNoder::new().node(vec![
            s(&[(0.0, 0.0), (1.0, 1.0)]),
            s(&[(100.0, 100.0), (101.0, 101.0)]),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn self_crossing_string() {
        let out = IndexNoder::new().node(vec![s(&[
            (0.0, 0.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 10.0),
        ])]);
        assert_eq!(out.len(), 3);
    }
}
