//! Timing comparison between the grid search and the quadratic scan.
//!
//! Run with `cargo run --release --example benchmark`. Divisions are chosen
//! from the widened threshold (interaction radius plus two maximal particle
//! radii) so the grid answer stays exact and can be asserted against the
//! reference scan.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cim2d::{brute_force, compute_neighbors, compute_neighbors_serial, max_divisions, Domain};

fn main() -> cim2d::Result<()> {
    env_logger::init();

    let side = 100.0;
    let radius = 1.0;
    let max_particle_radius = 0.25;
    let divisions = max_divisions(side, radius + 2.0 * max_particle_radius);

    println!("side {side}, interaction radius {radius}, grid {divisions} x {divisions}");
    println!(
        "{:>9} {:>12} {:>12} {:>12} {:>10}",
        "particles", "parallel", "serial", "brute", "pairs"
    );

    for &count in &[1_000usize, 5_000, 20_000, 50_000] {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let domain = Domain::random(side, count, max_particle_radius, &mut rng)?;

        let started = Instant::now();
        let parallel = compute_neighbors(&domain, divisions, radius)?;
        let t_parallel = started.elapsed();

        let started = Instant::now();
        let serial = compute_neighbors_serial(&domain, divisions, radius)?;
        let t_serial = started.elapsed();
        assert_eq!(parallel, serial);

        // The quadratic scan stops being reasonable past a few tens of
        // thousands of particles.
        let t_brute = if count <= 20_000 {
            let started = Instant::now();
            let reference = brute_force(&domain, radius)?;
            assert_eq!(parallel, reference);
            format!("{:.2?}", started.elapsed())
        } else {
            "-".into()
        };

        println!(
            "{count:>9} {:>12} {:>12} {t_brute:>12} {:>10}",
            format!("{t_parallel:.2?}"),
            format!("{t_serial:.2?}"),
            parallel.edge_count()
        );
    }
    Ok(())
}
