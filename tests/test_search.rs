use cim2d::{
    brute_force, compute_neighbors, compute_neighbors_serial, max_divisions, Domain, Error,
    Particle,
};

use crate::common::{assert_symmetric_and_irreflexive, seeded_domain};

mod common;

#[test]
fn test_rejects_cell_side_not_exceeding_the_radius() {
    // 10 / 5 = 2 < 3: a neighbor could sit beyond the adjacent cell ring.
    let domain = seeded_domain(10.0, 20, 0.0, 1);
    let err = compute_neighbors(&domain, 5, 3.0).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration(_)), "got {err:?}");
    let msg = err.to_string();
    assert!(msg.starts_with("invalid configuration"), "got: {msg}");
    assert!(msg.contains("cell side"), "got: {msg}");
}

#[test]
fn test_rejects_zero_divisions_and_bad_radii() {
    let domain = seeded_domain(10.0, 5, 0.0, 2);
    assert!(matches!(
        compute_neighbors(&domain, 0, 1.0),
        Err(Error::InvalidConfiguration(_))
    ));
    for radius in [0.0, -1.0, f64::NAN] {
        let result = compute_neighbors(&domain, 2, radius);
        assert!(
            matches!(result, Err(Error::InvalidConfiguration(_))),
            "radius {radius} was accepted"
        );
    }
}

#[test]
fn test_single_cell_grid_skips_the_cell_side_constraint() {
    // With one cell everything is compared against everything, so the
    // radius may exceed the cell side and the answer is still exact.
    let domain = seeded_domain(10.0, 30, 0.0, 3);
    let got = compute_neighbors(&domain, 1, 6.0).unwrap();
    assert_eq!(got, brute_force(&domain, 6.0).unwrap());
}

#[test]
fn test_wraparound_pair_across_the_seam() {
    let domain = Domain::new(
        10.0,
        vec![Particle::point_like(0.1, 5.0), Particle::point_like(9.9, 5.0)],
    )
    .unwrap();
    // Direct distance 9.8, wrapped distance 0.2. The particles sit in the
    // first and last column of the grid, adjacent only across the seam.
    let map = compute_neighbors(&domain, 5, 1.0).unwrap();
    assert!(map.are_neighbors(0, 1));
    assert!(map.are_neighbors(1, 0));
}

#[test]
fn test_coincident_point_particles_are_neighbors() {
    let domain = Domain::new(
        10.0,
        vec![Particle::point_like(4.0, 4.0), Particle::point_like(4.0, 4.0)],
    )
    .unwrap();
    let map = compute_neighbors(&domain, 3, 0.5).unwrap();
    assert!(map.are_neighbors(0, 1), "zero distance is within any radius");
}

#[test]
fn test_radii_shorten_the_surface_gap() {
    // Centers 5 apart, surfaces 1 apart after two radii of 2. The pair must
    // be kept at radius 1.5 and dropped at 0.9.
    let particles = vec![
        Particle::new(2.0, 5.0, 2.0).unwrap(),
        Particle::new(7.0, 5.0, 2.0).unwrap(),
    ];
    let domain = Domain::new(10.0, particles).unwrap();
    let found = compute_neighbors(&domain, 1, 1.5).unwrap();
    assert!(found.are_neighbors(0, 1));
    let missed = compute_neighbors(&domain, 1, 0.9).unwrap();
    assert!(!missed.are_neighbors(0, 1));
}

#[test]
fn test_threshold_is_inclusive() {
    // Surface gap exactly equal to the interaction radius.
    let domain = Domain::new(
        10.0,
        vec![Particle::point_like(2.0, 2.0), Particle::point_like(2.0, 4.5)],
    )
    .unwrap();
    let map = compute_neighbors(&domain, 1, 2.5).unwrap();
    assert!(map.are_neighbors(0, 1));
}

#[test]
fn test_matches_brute_force_on_random_domains() {
    for seed in [5u64, 17, 99] {
        let domain = seeded_domain(20.0, 200, 0.2, seed);
        let radius = 1.1;
        // Divisions account for the widened reach of the particle radii.
        let divisions = max_divisions(20.0, radius + 2.0 * 0.2);
        let reference = brute_force(&domain, radius).unwrap();
        let parallel = compute_neighbors(&domain, divisions, radius).unwrap();
        let serial = compute_neighbors_serial(&domain, divisions, radius).unwrap();
        assert_eq!(parallel, reference, "parallel disagrees for seed {seed}");
        assert_eq!(serial, reference, "serial disagrees for seed {seed}");
        assert_symmetric_and_irreflexive(&parallel);
    }
}

#[test]
fn test_two_by_two_grid_matches_brute_force() {
    // The collapsed stencil on M = 2 must neither drop nor double pairs.
    let domain = seeded_domain(10.0, 120, 0.0, 41);
    let reference = brute_force(&domain, 2.0).unwrap();
    let got = compute_neighbors(&domain, 2, 2.0).unwrap();
    assert_eq!(got, reference);
    assert_symmetric_and_irreflexive(&got);
}

#[test]
fn test_parallel_and_serial_agree_on_a_larger_domain() {
    let domain = seeded_domain(50.0, 3000, 0.25, 12345);
    let divisions = max_divisions(50.0, 1.0 + 2.0 * 0.25);
    let parallel = compute_neighbors(&domain, divisions, 1.0).unwrap();
    let serial = compute_neighbors_serial(&domain, divisions, 1.0).unwrap();
    assert_eq!(parallel, serial);
    assert_symmetric_and_irreflexive(&parallel);
}

#[test]
fn test_repeated_runs_agree() {
    let domain = seeded_domain(15.0, 400, 0.1, 8);
    let first = compute_neighbors(&domain, 9, 1.0).unwrap();
    for _ in 0..3 {
        assert_eq!(compute_neighbors(&domain, 9, 1.0).unwrap(), first);
    }
}

#[test]
fn test_empty_and_single_particle_domains() {
    let empty = Domain::new(10.0, Vec::new()).unwrap();
    let map = compute_neighbors(&empty, 4, 1.0).unwrap();
    assert_eq!(map.particle_count(), 0);
    assert_eq!(map.edge_count(), 0);

    let single = Domain::new(10.0, vec![Particle::point_like(5.0, 5.0)]).unwrap();
    let map = compute_neighbors(&single, 4, 1.0).unwrap();
    assert!(map.neighbors_of(0).is_empty());
}

#[test]
fn test_dense_cluster_within_one_cell() {
    // Same-cell pairs come from the triangular scan, not the stencil, and
    // every particle of the cluster must list the others.
    let particles = vec![
        Particle::point_like(1.0, 1.0),
        Particle::point_like(1.2, 1.1),
        Particle::point_like(1.1, 1.3),
        Particle::point_like(8.0, 8.0),
    ];
    let domain = Domain::new(10.0, particles).unwrap();
    let map = compute_neighbors(&domain, 3, 0.6).unwrap();
    assert!(map.are_neighbors(0, 1));
    assert!(map.are_neighbors(0, 2));
    assert!(map.are_neighbors(1, 2));
    assert!(map.neighbors_of(3).is_empty());
}
