//! Indexed point-in-ring testing.
//!
//! Decomposes the ring into monotone chains and indexes the chains by their
//! y-extent in a [`Bintree`].  A query selects only the chains whose
//! y-interval contains the test point, then only the segments within those
//! chains whose envelope meets the query ray, so repeated tests against a
//! large ring cost far less than a full scan.

use crate::geom::{Coordinate, Envelope};
use crate::index::{Bintree, Interval, MonotoneChain, build_chains};

use super::predicates::segment_crosses_positive_ray;

/// Reusable point-in-ring tester over a fixed ring.
pub struct McPointInRing {
    coords: Vec<Coordinate>,
    chains: Vec<MonotoneChain>,
    tree: Bintree<usize>,
}

impl McPointInRing {
    /// Build the index for a closed ring.  Repeated consecutive points are
    /// dropped first so chain construction sees clean segments.
    pub fn new(ring: &[Coordinate]) -> Self {
        let mut coords: Vec<Coordinate> = Vec::with_capacity(ring.len());
        for &c in ring {
            if coords.last() != Some(&c) {
                coords.push(c);
            }
        }
        let chains = build_chains(&coords, 0);
        let mut tree = Bintree::new();
        for (i, chain) in chains.iter().enumerate() {
            tree.insert(Interval::new(chain.env.min_y, chain.env.max_y), i);
        }
        Self { coords, chains, tree }
    }

    /// Ray-crossing parity test: is `pt` strictly inside the ring?
    ///
    /// Boundary points may report either way, as with the brute-force
    /// variant.
    pub fn is_inside(&self, pt: Coordinate) -> bool {
        let ray_env = Envelope::of(
            Coordinate::new(pt.x, pt.y),
            Coordinate::new(f64::INFINITY, pt.y),
        );
        let mut crossings = 0usize;
        for &ci in self.tree.query_value(pt.y) {
            let chain = &self.chains[ci];
            chain.select(&self.coords, &ray_env, &mut |i| {
                if segment_crosses_positive_ray(pt, self.coords[i], self.coords[i + 1]) {
                    crossings += 1;
                }
            });
        }
        crossings % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::predicates::point_in_ring;

    fn ring(pts: &[(f64, f64)]) -> Vec<Coordinate> {
        pts.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
    }

    #[test]
    fn square_interior_and_exterior() {
        let r = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let pir = McPointInRing::new(&r);
        assert!(pir.is_inside(Coordinate::new(5.0, 5.0)));
        assert!(!pir.is_inside(Coordinate::new(-1.0, 5.0)));
        assert!(!pir.is_inside(Coordinate::new(11.0, 5.0)));
        assert!(!pir.is_inside(Coordinate::new(5.0, 11.0)));
    }

    #[test]
    fn concave_ring() {
        // A "U" shape; the notch interior is outside.
        let r = ring(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (6.0, 10.0),
            (6.0, 2.0),
            (4.0, 2.0),
            (4.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]);
        let pir = McPointInRing::new(&r);
        assert!(pir.is_inside(Coordinate::new(2.0, 5.0)));
        assert!(pir.is_inside(Coordinate::new(8.0, 5.0)));
        assert!(pir.is_inside(Coordinate::new(5.0, 1.0)));
        assert!(!pir.is_inside(Coordinate::new(5.0, 5.0)));
    }

    #[test]
    fn matches_brute_force_on_irregular_polygon() {
        let r = ring(&[
            (0.0, 0.0),
            (7.0, -3.0),
            (12.0, 2.0),
            (9.0, 9.0),
            (3.0, 11.0),
            (-2.0, 6.0),
            (0.0, 0.0),
        ]);
        let pir = McPointInRing::new(&r);
        for ix in -4..=14 {
            for iy in -5..=13 {
                let p = Coordinate::new(ix as f64 + 0.5, iy as f64 + 0.5);
                assert_eq!(pir.is_inside(p), point_in_ring(p, &r), "at {p}");
            }
        }
    }
}
