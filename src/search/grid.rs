use nalgebra::Point2;
use rayon::prelude::*;

use crate::core::domain::Domain;

/// A cell of the M x M partition, identified by zero-based row and column.
///
/// Rows follow the y axis and columns the x axis, with cell (0, 0) at the
/// lower-left corner of the domain. Plain value semantics: two cells are the
/// same cell iff their coordinates match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Flat row-major id of this cell, `row * M + col`.
    #[inline]
    pub fn flat(self, divisions: usize) -> usize {
        self.row * divisions + self.col
    }

    /// Inverse of [`Cell::flat`].
    #[inline]
    pub fn from_flat(id: usize, divisions: usize) -> Self {
        Self {
            row: id / divisions,
            col: id % divisions,
        }
    }
}

/// The cell-to-particles index built once per computation.
///
/// Buckets hold particle indices into the domain's particle sequence, stored
/// in a flat row-major `Vec` of length M x M. Populated (non-empty) buckets
/// are tracked separately so the aggregation pass never scans empty cells.
#[derive(Debug)]
pub struct GridIndex {
    divisions: usize,
    cells: Vec<Vec<usize>>,
    populated: Vec<usize>, // flat ids of non-empty buckets, ascending
}

impl GridIndex {
    /// Buckets every particle of `domain` in a single linear pass.
    ///
    /// `divisions >= 1` must have been validated by the caller; given that,
    /// bucketing cannot fail because the domain guarantees every particle
    /// lies inside `[0, L]^2`.
    pub fn build(domain: &Domain, divisions: usize) -> Self {
        let side = domain.side_length();
        let ids = domain
            .particles()
            .iter()
            .map(|p| cell_for(&p.position, side, divisions).flat(divisions))
            .collect();
        Self::group(ids, divisions)
    }

    /// Same bucketing with the per-particle cell assignment mapped on the
    /// rayon pool. Assignment is a pure function of position, so the only
    /// shared write is the grouping merge, which stays sequential.
    pub fn par_build(domain: &Domain, divisions: usize) -> Self {
        let side = domain.side_length();
        let ids = domain
            .particles()
            .par_iter()
            .map(|p| cell_for(&p.position, side, divisions).flat(divisions))
            .collect();
        Self::group(ids, divisions)
    }

    fn group(ids: Vec<usize>, divisions: usize) -> Self {
        let mut cells = vec![Vec::new(); divisions * divisions];
        for (particle, id) in ids.into_iter().enumerate() {
            cells[id].push(particle);
        }
        let populated = cells
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(id, _)| id)
            .collect();
        Self {
            divisions,
            cells,
            populated,
        }
    }

    /// Number of cells per domain side (M).
    #[inline]
    pub fn divisions(&self) -> usize {
        self.divisions
    }

    /// The particle indices bucketed into `cell`.
    #[inline]
    pub fn particles_in(&self, cell: Cell) -> &[usize] {
        &self.cells[cell.flat(self.divisions)]
    }

    /// Flat ids of the non-empty cells, in ascending order.
    #[inline]
    pub fn populated_ids(&self) -> &[usize] {
        &self.populated
    }

    /// Iterates the non-empty cells with their particle buckets.
    pub fn populated(&self) -> impl Iterator<Item = (Cell, &[usize])> + '_ {
        self.populated
            .iter()
            .map(move |&id| (Cell::from_flat(id, self.divisions), self.cells[id].as_slice()))
    }

    /// Number of non-empty cells.
    #[inline]
    pub fn populated_count(&self) -> usize {
        self.populated.len()
    }
}

/// Maps a position to its cell: `row = floor(y * M / L)`,
/// `col = floor(x * M / L)` (grid origin at the lower-left corner, axes not
/// swapped). Positions exactly on the far boundary are legal domain members
/// and clamp to the last index.
pub(crate) fn cell_for(position: &Point2<f64>, side: f64, divisions: usize) -> Cell {
    debug_assert!(divisions >= 1);
    let factor = divisions as f64 / side;
    Cell {
        row: ((position.y * factor) as usize).min(divisions - 1),
        col: ((position.x * factor) as usize).min(divisions - 1),
    }
}
