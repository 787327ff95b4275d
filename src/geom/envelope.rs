use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Axis-aligned bounding box.  A "null" envelope (no points yet) has
/// `min_x > max_x`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Envelope {
    pub const fn null() -> Self {
        Self { min_x: 0.0, min_y: 0.0, max_x: -1.0, max_y: -1.0 }
    }

    pub fn of(a: Coordinate, b: Coordinate) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn from_coords<'a>(coords: impl IntoIterator<Item = &'a Coordinate>) -> Self {
        let mut env = Self::null();
        for c in coords {
            env.expand_to_include(*c);
        }
        env
    }

    pub fn is_null(&self) -> bool {
        self.min_x > self.max_x
    }

    pub fn width(&self) -> f64 {
        if self.is_null() { 0.0 } else { self.max_x - self.min_x }
    }

    pub fn height(&self) -> f64 {
        if self.is_null() { 0.0 } else { self.max_y - self.min_y }
    }

    pub fn expand_to_include(&mut self, c: Coordinate) {
        if self.is_null() {
            *self = Self { min_x: c.x, min_y: c.y, max_x: c.x, max_y: c.y };
        } else {
            self.min_x = self.min_x.min(c.x);
            self.min_y = self.min_y.min(c.y);
            self.max_x = self.max_x.max(c.x);
            self.max_y = self.max_y.max(c.y);
        }
    }

    pub fn expand_by(&mut self, distance: f64) {
        if !self.is_null() {
            self.min_x -= distance;
            self.min_y -= distance;
            self.max_x += distance;
            self.max_y += distance;
        }
    }

    pub fn intersects(&self, other: &Envelope) -> bool {
        !(self.is_null()
            || other.is_null()
            || other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    pub fn contains_coord(&self, c: Coordinate) -> bool {
        !self.is_null()
            && c.x >= self.min_x
            && c.x <= self.max_x
            && c.y >= self.min_y
            && c.y <= self.max_y
    }

    /// True if `other` lies entirely inside this envelope.
    pub fn contains(&self, other: &Envelope) -> bool {
        !self.is_null()
            && !other.is_null()
            && other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_envelope_expands_from_first_point() {
        let mut env = Envelope::null();
        assert!(env.is_null());
        env.expand_to_include(Coordinate::new(2.0, 3.0));
        assert!(!env.is_null());
        assert_eq!(env.width(), 0.0);
        env.expand_to_include(Coordinate::new(-1.0, 5.0));
        assert_eq!(env.min_x, -1.0);
        assert_eq!(env.max_y, 5.0);
    }

    #[test]
    fn disjoint_envelopes_do_not_intersect() {
        let a = Envelope::of(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0));
        let b = Envelope::of(Coordinate::new(2.0, 2.0), Coordinate::new(3.0, 3.0));
        assert!(!a.intersects(&b));
        let c = Envelope::of(Coordinate::new(0.5, 0.5), Coordinate::new(3.0, 3.0));
        assert!(a.intersects(&c));
    }

    #[test]
    fn expand_by_pads_all_sides() {
        let mut env = Envelope::of(Coordinate::new(0.0, 0.0), Coordinate::new(4.0, 2.0));
        env.expand_by(1.5);
        assert_eq!(env.min_x, -1.5);
        assert_eq!(env.max_y, 3.5);
        assert_eq!(env.width(), 7.0);
        let mut null = Envelope::null();
        null.expand_by(1.0);
        assert!(null.is_null());
    }

    #[test]
    fn containment() {
        let outer = Envelope::of(Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 10.0));
        let inner = Envelope::of(Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }
}
