use std::collections::HashSet;

use parking_lot::Mutex;
use rayon::prelude::*;

use crate::core::domain::Domain;
use crate::core::spatial::within_interaction;
use crate::search::grid::{Cell, GridIndex};
use crate::search::stencil::half_neighbors;
use crate::search::NeighborMap;

/// Single-threaded aggregation. Every populated cell contributes its
/// internal pairs (triangular scan, each unordered pair tested once) and
/// its cross pairs against the half stencil; both endpoints of a found pair
/// are recorded in the same step.
pub(crate) fn serial_pass(
    domain: &Domain,
    grid: &GridIndex,
    interaction_radius: f64,
) -> NeighborMap {
    let particles = domain.particles();
    let side = domain.side_length();
    let mut map = NeighborMap::with_len(particles.len());

    for (cell, bucket) in grid.populated() {
        // 1. Pairs inside the cell.
        for (k, &i) in bucket.iter().enumerate() {
            for &j in &bucket[k + 1..] {
                if within_interaction(&particles[i], &particles[j], side, interaction_radius) {
                    map.insert_pair(i, j);
                }
            }
        }
        // 2. Cross pairs against the forward half of the neighborhood.
        for target in half_neighbors(cell, grid.divisions()) {
            for &i in bucket {
                for &j in grid.particles_in(target) {
                    if within_interaction(&particles[i], &particles[j], side, interaction_radius) {
                        map.insert_pair(i, j);
                    }
                }
            }
        }
    }
    map
}

/// Parallel aggregation: populated cells fan out over the rayon pool and
/// write through one lock per particle.
///
/// Locks are taken one at a time, never nested, so cells that race on a
/// shared particle only serialize on that particle's set. On tiny grids two
/// cells can both forward to each other across the wrap; the set inserts
/// make the second visit a no-op.
pub(crate) fn parallel_pass(
    domain: &Domain,
    grid: &GridIndex,
    interaction_radius: f64,
) -> NeighborMap {
    let particles = domain.particles();
    let side = domain.side_length();
    let slots: Vec<Mutex<HashSet<usize>>> = (0..particles.len())
        .map(|_| Mutex::new(HashSet::new()))
        .collect();

    grid.populated_ids().par_iter().for_each(|&id| {
        let cell = Cell::from_flat(id, grid.divisions());
        let bucket = grid.particles_in(cell);
        let link = |i: usize, j: usize| {
            slots[i].lock().insert(j);
            slots[j].lock().insert(i);
        };
        // 1. Pairs inside the cell.
        for (k, &i) in bucket.iter().enumerate() {
            for &j in &bucket[k + 1..] {
                if within_interaction(&particles[i], &particles[j], side, interaction_radius) {
                    link(i, j);
                }
            }
        }
        // 2. Cross pairs against the forward half of the neighborhood.
        for target in half_neighbors(cell, grid.divisions()) {
            for &i in bucket {
                for &j in grid.particles_in(target) {
                    if within_interaction(&particles[i], &particles[j], side, interaction_radius) {
                        link(i, j);
                    }
                }
            }
        }
    });

    NeighborMap::from_sets(slots.into_iter().map(Mutex::into_inner).collect())
}
