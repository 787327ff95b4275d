use serde::{Deserialize, Serialize};

/// A closed 1-dimensional range `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max { Self { min, max } } else { Self { min: max, max: min } }
    }

    pub fn point(v: f64) -> Self {
        Self { min: v, max: v }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.min <= other.max && self.max >= other.min
    }

    pub fn contains(&self, other: &Interval) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    pub fn contains_value(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn expand_to_include(&mut self, other: &Interval) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_normalizes_order() {
        let i = Interval::new(5.0, 1.0);
        assert_eq!(i.min, 1.0);
        assert_eq!(i.max, 5.0);
    }

    #[test]
    fn overlap_includes_touching_endpoints() {
        assert!(Interval::new(0.0, 1.0).overlaps(&Interval::new(1.0, 2.0)));
        assert!(!Interval::new(0.0, 1.0).overlaps(&Interval::new(1.1, 2.0)));
    }

    #[test]
    fn containment() {
        assert!(Interval::new(0.0, 10.0).contains(&Interval::new(2.0, 3.0)));
        assert!(!Interval::new(0.0, 10.0).contains(&Interval::new(2.0, 30.0)));
        assert!(Interval::new(0.0, 10.0).contains_value(10.0));
    }
}
