//! The chain-indexed point-in-ring test agrees with the plain crossing
//! count on random query points.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use geotopo::algorithm::{point_in_ring, McPointInRing};
use geotopo::Coordinate;

fn jagged_ring() -> Vec<Coordinate> {
    [
        (0.0, 0.0),
        (20.0, 0.0),
        (20.0, 8.0),
        (14.0, 8.0),
        (14.0, 3.0),
        (10.0, 3.0),
        (10.0, 12.0),
        (20.0, 12.0),
        (20.0, 20.0),
        (0.0, 20.0),
        (0.0, 14.0),
        (6.0, 14.0),
        (6.0, 6.0),
        (0.0, 6.0),
        (0.0, 0.0),
    ]
    .iter()
    .map(|&(x, y)| Coordinate::new(x, y))
    .collect()
}

#[test]
fn indexed_matches_plain_on_random_points() {
    let ring = jagged_ring();
    let indexed = McPointInRing::new(&ring);
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..2000 {
        // Offsets keep queries off the ring's integer lattice.
        let pt = Coordinate::new(
            rng.random_range(-2.0..22.0) + 0.123,
            rng.random_range(-2.0..22.0) + 0.456,
        );
        assert_eq!(indexed.is_inside(pt), point_in_ring(pt, &ring), "{pt:?}");
    }
}
