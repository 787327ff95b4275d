use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::{Coordinate, Envelope};

/// An ordered, owned list of coordinates.
///
/// Every sequence owns its storage exclusively: `slice` and `reversed`
/// return independent copies rather than views, so mutating one sequence
/// can never affect another.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSeq(Vec<Coordinate>);

impl CoordinateSeq {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_coords(coords: Vec<Coordinate>) -> Self {
        Self(coords)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<Coordinate> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.0.last().copied()
    }

    pub fn get(&self, i: usize) -> Option<Coordinate> {
        self.0.get(i).copied()
    }

    pub fn push(&mut self, c: Coordinate) {
        self.0.push(c);
    }

    pub fn insert(&mut self, i: usize, c: Coordinate) {
        self.0.insert(i, c);
    }

    pub fn remove(&mut self, i: usize) -> Coordinate {
        self.0.remove(i)
    }

    pub fn set(&mut self, i: usize, c: Coordinate) {
        self.0[i] = c;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Coordinate> {
        self.0
    }

    /// Owned copy of the coordinates in `range`.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Self {
        Self(self.0[range].to_vec())
    }

    /// Owned copy with the coordinate order reversed.
    pub fn reversed(&self) -> Self {
        let mut v = self.0.clone();
        v.reverse();
        Self(v)
    }

    pub fn reverse(&mut self) {
        self.0.reverse();
    }

    /// First and last coordinates are equal (2D) and the sequence is
    /// non-empty.
    pub fn is_closed(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Append the first coordinate if the sequence is not closed.
    pub fn close_ring(&mut self) {
        if !self.is_empty() && !self.is_closed() {
            let first = self.0[0];
            self.0.push(first);
        }
    }

    /// Owned copy with consecutive repeated (2D-equal) points removed.
    pub fn without_repeated(&self) -> Self {
        let mut out: Vec<Coordinate> = Vec::with_capacity(self.0.len());
        for &c in &self.0 {
            if out.last() != Some(&c) {
                out.push(c);
            }
        }
        Self(out)
    }

    pub fn envelope(&self) -> Envelope {
        Envelope::from_coords(self.iter())
    }

    pub fn expand_envelope(&self, env: &mut Envelope) {
        for &c in &self.0 {
            env.expand_to_include(c);
        }
    }
}

impl Index<usize> for CoordinateSeq {
    type Output = Coordinate;

    fn index(&self, i: usize) -> &Coordinate {
        &self.0[i]
    }
}

impl FromIterator<Coordinate> for CoordinateSeq {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CoordinateSeq {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for CoordinateSeq {
    type Item = Coordinate;
    type IntoIter = std::vec::IntoIter<Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Vec<Coordinate>> for CoordinateSeq {
    fn from(v: Vec<Coordinate>) -> Self {
        Self(v)
    }
}

impl From<Vec<(f64, f64)>> for CoordinateSeq {
    fn from(v: Vec<(f64, f64)>) -> Self {
        Self(v.into_iter().map(Coordinate::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(pts: &[(f64, f64)]) -> CoordinateSeq {
        pts.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
    }

    #[test]
    fn slicing_copies() {
        let s = seq(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let mut sliced = s.slice(0..2);
        sliced.set(0, Coordinate::new(9.0, 9.0));
        assert_eq!(s[0], Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn close_ring_appends_first() {
        let mut s = seq(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(!s.is_closed());
        s.close_ring();
        assert!(s.is_closed());
        assert_eq!(s.len(), 4);
        // Idempotent.
        s.close_ring();
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn repeated_points_are_dropped() {
        let s = seq(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(s.without_repeated().len(), 3);
    }
}
