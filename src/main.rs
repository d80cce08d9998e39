use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use cim2d::{
    brute_force, compute_neighbors, compute_neighbors_serial, max_divisions, Domain, NeighborMap,
    Particle,
};

// --- CLI Definitions ---

#[derive(Parser, Debug)]
#[command(author, version, about = "Cell index neighbor detection in a periodic 2D domain", long_about = None)]
struct Args {
    /// Side length of the square domain
    #[arg(short = 'l', long, default_value_t = 20.0)]
    side_length: f64,

    /// Number of random particles to generate (ignored with --input)
    #[arg(short = 'n', long, default_value_t = 1000)]
    particles: usize,

    /// Interaction radius between particle surfaces
    #[arg(short = 'r', long, default_value_t = 1.0)]
    interaction_radius: f64,

    /// Grid divisions per side; defaults to the largest count the radius allows
    #[arg(short = 'm', long)]
    grid_divisions: Option<usize>,

    /// Upper bound for randomly drawn particle radii
    #[arg(long, default_value_t = 0.0)]
    max_radius: f64,

    /// Seed for reproducible particle generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Worker threads for the search (0 keeps the rayon default)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Run the single-threaded search instead of the parallel one
    #[arg(long)]
    serial: bool,

    /// Re-run with the quadratic scan and compare the answers
    #[arg(long)]
    verify: bool,

    /// Read the domain from a JSON file instead of generating one
    #[arg(short, long)]
    input: Option<PathBuf>,
}

// --- Domain Input (JSON) ---

/// On-disk domain description. Parsed into plain fields first and then fed
/// through the library constructors, so a hand-edited file cannot smuggle an
/// out-of-bounds particle past validation.
#[derive(Debug, Deserialize)]
struct DomainInput {
    side_length: f64,
    particles: Vec<ParticleInput>,
}

#[derive(Debug, Deserialize)]
struct ParticleInput {
    x: f64,
    y: f64,
    #[serde(default)]
    radius: f64,
}

fn load_domain(path: &Path) -> Result<Domain> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read domain file {}", path.display()))?;
    let input: DomainInput = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse domain file {}", path.display()))?;
    let particles = input
        .particles
        .into_iter()
        .map(|p| Particle::new(p.x, p.y, p.radius))
        .collect::<cim2d::Result<Vec<_>>>()?;
    Ok(Domain::new(input.side_length, particles)?)
}

fn build_domain(args: &Args) -> Result<Domain> {
    if let Some(path) = &args.input {
        return load_domain(path);
    }
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    Ok(Domain::random(
        args.side_length,
        args.particles,
        args.max_radius,
        &mut rng,
    )?)
}

// --- Reporting ---

fn report(map: &NeighborMap, elapsed: Duration) {
    if map.particle_count() == 0 {
        println!("empty domain, nothing to report");
        return;
    }
    let mut min = usize::MAX;
    let mut max = 0usize;
    let mut total = 0usize;
    for (_, neighbors) in map.iter() {
        min = min.min(neighbors.len());
        max = max.max(neighbors.len());
        total += neighbors.len();
    }
    let mean = total as f64 / map.particle_count() as f64;
    println!(
        "{} particles, {} neighbor pairs in {:.2?}",
        map.particle_count(),
        map.edge_count(),
        elapsed
    );
    println!("neighbors per particle: min {min}, mean {mean:.2}, max {max}");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("Failed to size the rayon pool")?;
    }

    let domain = build_domain(&args)?;
    let divisions = args
        .grid_divisions
        .unwrap_or_else(|| max_divisions(domain.side_length(), args.interaction_radius));
    info!(
        "domain: side {}, {} particles; grid {divisions} x {divisions}",
        domain.side_length(),
        domain.len()
    );

    let started = Instant::now();
    let map = if args.serial {
        compute_neighbors_serial(&domain, divisions, args.interaction_radius)?
    } else {
        compute_neighbors(&domain, divisions, args.interaction_radius)?
    };
    report(&map, started.elapsed());

    if args.verify {
        let started = Instant::now();
        let reference = brute_force(&domain, args.interaction_radius)?;
        if map != reference {
            bail!(
                "grid search disagrees with the quadratic scan: {} pairs vs {}",
                map.edge_count(),
                reference.edge_count()
            );
        }
        println!(
            "verified against the quadratic scan in {:.2?}",
            started.elapsed()
        );
    }

    Ok(())
}
