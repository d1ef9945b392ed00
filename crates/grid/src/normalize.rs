//! Trailing-blank trimming.
//!
//! The Sheets API omits trailing empty cells of a row and trailing empty
//! rows of a range when returning values. Normalizing a declared grid makes
//! it comparable with what the API would hand back for the same content.

use crate::grid::{Grid, Row};

/// Blank = empty after trimming whitespace. `"0"` and `"false"` are content.
pub fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// Drop the trailing run of blank cells. Kept cells are not trimmed.
pub fn trim_trailing_blanks(row: &mut Row) {
    let keep = row.iter().rposition(|c| !is_blank(c)).map_or(0, |i| i + 1);
    row.truncate(keep);
}

/// Drop rows from the end while they contain only blanks. Interior blank
/// rows are kept.
pub fn drop_trailing_blank_rows(rows: &mut Vec<Row>) {
    let keep = rows
        .iter()
        .rposition(|row| row.iter().any(|c| !is_blank(c)))
        .map_or(0, |i| i + 1);
    rows.truncate(keep);
}

/// Normalize a grid: trim every row, then drop trailing blank rows.
/// Idempotent.
pub fn normalize(mut grid: Grid) -> Grid {
    let rows = grid.rows_mut();
    for row in rows.iter_mut() {
        trim_trailing_blanks(row);
    }
    drop_trailing_blank_rows(rows);
    grid
}

impl Grid {
    /// Normalized copy, see [`normalize`].
    pub fn normalized(&self) -> Grid {
        normalize(self.clone())
    }
}
