//! Neighbor search over the periodic domain.
//!
//! The cell index method buckets particles into an M x M grid and only
//! tests pairs drawn from the same or adjacent cells, cutting the all-pairs
//! scan down to each cell's local neighborhood. [`brute_force`] keeps the
//! quadratic scan around as the reference answer for verification.

mod aggregate;
pub mod grid;
pub mod stencil;

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::core::domain::Domain;
use crate::core::error::{Error, Result};
use crate::core::spatial::within_interaction;
use crate::search::grid::GridIndex;

/// Symmetric neighbor relation over particle indices, one set per particle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborMap {
    sets: Vec<HashSet<usize>>,
}

impl NeighborMap {
    fn with_len(len: usize) -> Self {
        Self {
            sets: vec![HashSet::new(); len],
        }
    }

    fn from_sets(sets: Vec<HashSet<usize>>) -> Self {
        Self { sets }
    }

    /// Records `i` and `j` as neighbors of each other.
    fn insert_pair(&mut self, i: usize, j: usize) {
        debug_assert_ne!(i, j, "a particle is never its own neighbor");
        self.sets[i].insert(j);
        self.sets[j].insert(i);
    }

    /// The neighbors of particle `index`.
    pub fn neighbors_of(&self, index: usize) -> &HashSet<usize> {
        &self.sets[index]
    }

    pub fn are_neighbors(&self, i: usize, j: usize) -> bool {
        self.sets[i].contains(&j)
    }

    /// Number of particles the map was built over.
    pub fn particle_count(&self) -> usize {
        self.sets.len()
    }

    /// Number of unordered neighbor pairs.
    pub fn edge_count(&self) -> usize {
        self.sets.iter().map(HashSet::len).sum::<usize>() / 2
    }

    /// Iterates `(particle, neighbors)` in particle order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &HashSet<usize>)> {
        self.sets.iter().enumerate()
    }
}

fn validate_radius(interaction_radius: f64) -> Result<()> {
    if !interaction_radius.is_finite() || interaction_radius <= 0.0 {
        return Err(Error::InvalidConfiguration(format!(
            "interaction radius must be finite and positive, got {interaction_radius}"
        )));
    }
    Ok(())
}

/// Checks the grid parameters against the domain before any bucketing.
///
/// With more than one division the cell side must strictly exceed the
/// interaction radius, otherwise a neighbor could sit beyond the adjacent
/// cell ring and the stencil would miss it. Particle radii widen the
/// effective reach past the bare interaction radius; that case stays legal
/// but is logged, since the caller may want fewer divisions.
fn validate(domain: &Domain, divisions: usize, interaction_radius: f64) -> Result<()> {
    if divisions == 0 {
        return Err(Error::InvalidConfiguration(
            "grid divisions must be at least 1".into(),
        ));
    }
    validate_radius(interaction_radius)?;
    if divisions > 1 {
        let side = domain.side_length();
        let cell_side = side / divisions as f64;
        if cell_side <= interaction_radius {
            return Err(Error::InvalidConfiguration(format!(
                "cell side {cell_side} must exceed the interaction radius \
                 {interaction_radius} (side length {side}, {divisions} divisions)"
            )));
        }
        let max_radius = domain
            .particles()
            .iter()
            .map(|p| p.radius)
            .fold(0.0, f64::max);
        if max_radius > 0.0 && cell_side <= interaction_radius + 2.0 * max_radius {
            warn!(
                "cell side {cell_side} does not cover the widest surface pair \
                 (interaction radius {interaction_radius} plus two radii of {max_radius}); \
                 consider at most {} divisions",
                max_divisions(side, interaction_radius + 2.0 * max_radius)
            );
        }
    }
    Ok(())
}

/// Computes the neighbor map of `domain` with the cell index method,
/// building the grid and aggregating pairs on the rayon pool.
///
/// Two particles are neighbors when their surface distance under periodic
/// wrapping is within `interaction_radius`, inclusive. The relation is
/// symmetric and never relates a particle to itself.
pub fn compute_neighbors(
    domain: &Domain,
    divisions: usize,
    interaction_radius: f64,
) -> Result<NeighborMap> {
    validate(domain, divisions, interaction_radius)?;
    info!(
        "cell index search: {} particles, {divisions} x {divisions} grid, \
         interaction radius {interaction_radius}",
        domain.len()
    );
    let grid = GridIndex::par_build(domain, divisions);
    debug!(
        "grid built: {} of {} cells populated",
        grid.populated_count(),
        divisions * divisions
    );
    let map = aggregate::parallel_pass(domain, &grid, interaction_radius);
    debug!("{} neighbor pairs found", map.edge_count());
    Ok(map)
}

/// Single-threaded variant of [`compute_neighbors`]. Same validation, same
/// answer; useful as a baseline and in contexts that must not touch the
/// thread pool.
pub fn compute_neighbors_serial(
    domain: &Domain,
    divisions: usize,
    interaction_radius: f64,
) -> Result<NeighborMap> {
    validate(domain, divisions, interaction_radius)?;
    let grid = GridIndex::build(domain, divisions);
    let map = aggregate::serial_pass(domain, &grid, interaction_radius);
    debug!("{} neighbor pairs found (serial)", map.edge_count());
    Ok(map)
}

/// Quadratic reference scan over all unordered pairs, no grid involved.
///
/// Shares the interaction predicate with the cell index method so that
/// borderline pairs classify identically in both.
pub fn brute_force(domain: &Domain, interaction_radius: f64) -> Result<NeighborMap> {
    validate_radius(interaction_radius)?;
    let particles = domain.particles();
    let side = domain.side_length();
    let mut map = NeighborMap::with_len(particles.len());
    for i in 0..particles.len() {
        for j in i + 1..particles.len() {
            if within_interaction(&particles[i], &particles[j], side, interaction_radius) {
                map.insert_pair(i, j);
            }
        }
    }
    Ok(map)
}

/// Largest division count whose cell side strictly exceeds the interaction
/// radius, never less than 1.
///
/// `floor(L / r)` is the obvious candidate but lands exactly on the bound
/// whenever `r` divides `L`, so the count backs off until the strict
/// inequality holds.
pub fn max_divisions(side_length: f64, interaction_radius: f64) -> usize {
    let mut m = (side_length / interaction_radius).floor() as usize;
    while m > 1 && side_length / m as f64 <= interaction_radius {
        m -= 1;
    }
    m.max(1)
}
