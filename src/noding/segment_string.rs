//! Segment strings: coordinate chains that accumulate intersection nodes.

use smallvec::SmallVec;

use crate::geom::{Coordinate, Envelope};

/// An intersection point registered on a segment string.
///
/// Nodes order by position along the string: segment index first, then
/// distance from the segment's start coordinate.
#[derive(Clone, Copy, Debug)]
pub struct SegmentNode {
    pub coord: Coordinate,
    pub seg_index: usize,
    dist: f64,
}

impl SegmentNode {
    fn cmp_key(&self) -> (usize, f64) {
        (self.seg_index, self.dist)
    }
}

/// A polyline plus the intersection nodes found on it.
///
/// `data` is an opaque caller id carried through noding; split substrings
/// inherit it from their parent.
#[derive(Clone, Debug)]
pub struct SegmentString {
    coords: Vec<Coordinate>,
    pub data: usize,
    // Most strings collect no more than a handful of nodes; keep them
    // inline.
    nodes: SmallVec<[SegmentNode; 4]>,
}

impl SegmentString {
    pub fn new(coords: Vec<Coordinate>, data: usize) -> Self {
        Self { coords, data, nodes: SmallVec::new() }
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn num_segments(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    pub fn is_closed(&self) -> bool {
        self.coords.len() > 1 && self.coords.first() == self.coords.last()
    }

    pub fn envelope(&self) -> Envelope {
        Envelope::from_coords(self.coords.iter())
    }

    /// Register an intersection at `coord` on segment `seg_index`.
    ///
    /// A point landing exactly on the segment's far endpoint is normalized
    /// onto the start of the following segment, so node keys stay unique
    /// per location.
    pub fn add_intersection(&mut self, coord: Coordinate, seg_index: usize) {
        let mut seg_index = seg_index;
        if seg_index + 1 < self.coords.len() - 1 && coord == self.coords[seg_index + 1] {
            seg_index += 1;
        }
        let dist = coord.distance(&self.coords[seg_index]);
        self.nodes.push(SegmentNode { coord, seg_index, dist });
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Split at every node into substrings whose only shared points are
    /// their endpoints.  Endpoint nodes and duplicates collapse; zero-length
    /// pieces are never emitted.
    pub fn split(&self) -> Vec<SegmentString> {
        if self.coords.len() < 2 {
            return Vec::new();
        }
        let mut nodes = self.nodes.clone();
        // Implicit nodes at both string endpoints.
        nodes.push(SegmentNode { coord: self.coords[0], seg_index: 0, dist: 0.0 });
        let last = self.coords.len() - 1;
        nodes.push(SegmentNode {
            coord: self.coords[last],
            seg_index: last - 1,
            dist: self.coords[last].distance(&self.coords[last - 1]),
        });
        nodes.sort_by(|a, b| {
            a.cmp_key()
                .partial_cmp(&b.cmp_key())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        nodes.dedup_by(|a, b| a.seg_index == b.seg_index && a.coord == b.coord);

        let mut out = Vec::with_capacity(nodes.len().saturating_sub(1));
        for w in nodes.windows(2) {
            if let Some(piece) = self.substring(&w[0], &w[1]) {
                out.push(piece);
            }
        }
        out
    }

    /// The substring between two consecutive nodes, or `None` if it has no
    /// extent.
    fn substring(&self, from: &SegmentNode, to: &SegmentNode) -> Option<SegmentString> {
        let mut pts = Vec::with_capacity(to.seg_index - from.seg_index + 2);
        pts.push(from.coord);
        for i in from.seg_index + 1..=to.seg_index {
            push_distinct(&mut pts, self.coords[i]);
        }
        push_distinct(&mut pts, to.coord);
        if pts.len() < 2 {
            return None;
        }
        Some(SegmentString::new(pts, self.data))
    }
}

fn push_distinct(pts: &mut Vec<Coordinate>, c: Coordinate) {
    if pts.last() != Some(&c) {
        pts.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn split_without_nodes_reproduces_the_string() {
        let s = SegmentString::new(vec![c(0.0, 0.0), c(5.0, 0.0), c(10.0, 0.0)], 7);
        let parts = s.split();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].coords(), s.coords());
        assert_eq!(parts[0].data, 7);
    }

    #[test]
    fn split_at_interior_node() {
        let mut s = SegmentString::new(vec![c(0.0, 0.0), c(10.0, 0.0)], 0);
        s.add_intersection(c(4.0, 0.0), 0);
        let parts = s.split();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].coords(), &[c(0.0, 0.0), c(4.0, 0.0)]);
        assert_eq!(parts[1].coords(), &[c(4.0, 0.0), c(10.0, 0.0)]);
    }

    #[test]
    fn node_on_vertex_does_not_create_empty_piece() {
        let mut s = SegmentString::new(vec![c(0.0, 0.0), c(5.0, 0.0), c(10.0, 0.0)], 0);
        s.add_intersection(c(5.0, 0.0), 0);
        s.add_intersection(c(5.0, 0.0), 1);
        let parts = s.split();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].coords(), &[c(0.0, 0.0), c(5.0, 0.0)]);
        assert_eq!(parts[1].coords(), &[c(5.0, 0.0), c(10.0, 0.0)]);
    }

    #[test]
    fn nodes_sort_along_the_string() {
        let mut s = SegmentString::new(vec![c(0.0, 0.0), c(10.0, 0.0)], 0);
        s.add_intersection(c(7.0, 0.0), 0);
        s.add_intersection(c(3.0, 0.0), 0);
        let parts = s.split();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].coords(), &[c(3.0, 0.0), c(7.0, 0.0)]);
    }
}
