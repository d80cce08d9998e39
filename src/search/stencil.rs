use crate::search::grid::Cell;

/// Half of the 8-cell Moore neighborhood as (row, col) offsets: north,
/// north-east, east, south-east. Visiting only these four from every cell
/// covers each unordered pair of adjacent cells exactly once on grids with
/// M >= 3; the other four directions are the reflections seen from the
/// opposite cell.
const HALF_STENCIL: [(isize, isize); 4] = [(1, 0), (1, 1), (0, 1), (-1, 1)];

#[inline]
fn wrap(index: isize, divisions: isize) -> usize {
    index.rem_euclid(divisions) as usize
}

/// The distinct cells `cell` forwards to under the half stencil, with
/// periodic wrap on both axes.
///
/// The center cell is never returned: on a 1 x 1 grid every offset wraps
/// back onto the cell itself and the list is empty. On a 2 x 2 grid the
/// north-east and south-east offsets collapse onto the same cell and are
/// deduplicated; the pairs that remain doubly adjacent on such a grid are
/// absorbed by the set semantics of the neighbor map.
pub fn half_neighbors(cell: Cell, divisions: usize) -> Vec<Cell> {
    let m = divisions as isize;
    let mut out = Vec::with_capacity(HALF_STENCIL.len());
    for (dr, dc) in HALF_STENCIL {
        let target = Cell {
            row: wrap(cell.row as isize + dr, m),
            col: wrap(cell.col as isize + dc, m),
        };
        if target != cell && !out.contains(&target) {
            out.push(target);
        }
    }
    out
}
