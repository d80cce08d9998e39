use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cim2d::{Domain, NeighborMap};

/// Reproducible random domain for the behavioral tests.
pub fn seeded_domain(side: f64, count: usize, max_radius: f64, seed: u64) -> Domain {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Domain::random(side, count, max_radius, &mut rng).expect("fixture domain must be valid")
}

/// Checks the structural invariants every neighbor map must satisfy: no
/// particle relates to itself and every relation holds from both ends.
pub fn assert_symmetric_and_irreflexive(map: &NeighborMap) {
    for (i, neighbors) in map.iter() {
        assert!(!neighbors.contains(&i), "particle {i} lists itself");
        for &j in neighbors {
            assert!(
                map.are_neighbors(j, i),
                "asymmetric pair: {i} lists {j} but not the reverse"
            );
        }
    }
}
