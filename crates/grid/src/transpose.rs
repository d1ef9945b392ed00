//! Switching a grid between row-major and column-major layout.

use crate::grid::Grid;

/// Swap rows and columns: cell `(i, j)` moves to `(j, i)`.
///
/// Ragged input keeps its footprint. Each output row ends at the last
/// input row that reached that column; gaps before it are filled with
/// `""` because a positional write cannot skip a cell.
pub fn transpose(grid: &Grid) -> Grid {
    let rows = (0..grid.width())
        .map(|j| {
            let end = (0..grid.len())
                .rev()
                .find(|&i| grid.row_len(i) > j)
                .map_or(0, |i| i + 1);
            (0..end)
                .map(|i| grid.cell(i, j).unwrap_or_default().to_string())
                .collect()
        })
        .collect();
    Grid::from_rows(rows)
}
