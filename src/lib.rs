//! Cell index neighbor detection for circular particles in a square
//! periodic domain.
//!
//! The domain is partitioned into an M x M grid, particles are bucketed by
//! position, and candidate pairs are drawn only from the same or adjacent
//! cells. Two particles are neighbors when the distance between their
//! surfaces, measured under periodic wrapping, is within the interaction
//! radius. The typical flow:
//!
//! ```
//! use cim2d::{compute_neighbors, max_divisions, Domain, Particle};
//!
//! # fn main() -> cim2d::Result<()> {
//! let particles = vec![
//!     Particle::point_like(0.4, 5.0),
//!     Particle::point_like(19.8, 5.0),
//! ];
//! let domain = Domain::new(20.0, particles)?;
//! let divisions = max_divisions(domain.side_length(), 1.0);
//! let neighbors = compute_neighbors(&domain, divisions, 1.0)?;
//! assert!(neighbors.are_neighbors(0, 1)); // across the periodic seam
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod search;

pub use crate::core::domain::{Domain, Particle};
pub use crate::core::error::{Error, Result};
pub use crate::search::{
    brute_force, compute_neighbors, compute_neighbors_serial, max_divisions, NeighborMap,
};
