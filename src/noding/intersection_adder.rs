//! Shared intersection-detection step used by all noders.

use crate::algorithm::{IntersectionKind, LineIntersector};

use super::SegmentString;

/// Computes the intersection of segment `si` of `strings[i]` with segment
/// `sj` of `strings[j]` and registers any resulting nodes on both strings.
///
/// Returns `true` if a proper (interior-interior) intersection was found.
pub(super) fn add_intersections(
    strings: &mut [SegmentString],
    i: usize,
    si: usize,
    j: usize,
    sj: usize,
    li: &mut LineIntersector,
) -> bool {
    if i == j && si == sj {
        return false;
    }
    let p1 = strings[i].coords()[si];
    let p2 = strings[i].coords()[si + 1];
    let q1 = strings[j].coords()[sj];
    let q2 = strings[j].coords()[sj + 1];
    li.compute(p1, p2, q1, q2);
    if !li.has_intersection() {
        return false;
    }

    // A plain shared endpoint needs no node; split substrings already end
    // there.  This also covers adjacent segments of one string, whose
    // shared vertex is an endpoint of both.
    if li.kind == IntersectionKind::Point && !li.proper {
        let p = li.pts[0];
        if (p == p1 || p == p2) && (p == q1 || p == q2) {
            return false;
        }
    }

    for k in 0..li.num_points() {
        let pt = li.pts[k];
        strings[i].add_intersection(pt, si);
        strings[j].add_intersection(pt, sj);
    }
    li.proper
}
