//! Dimension reconciliation.
//!
//! A range resource only owns the cells it declared. When the declaration
//! changes, the payload sent to the API must blank everything the previous
//! declaration covered and then write the new values on top, so cells that
//! drop out of the declaration are cleared while the rest of the range is
//! left alone.

use crate::grid::Grid;

/// Same row count and per-row lengths as `reference`, every cell `""`.
pub fn blank(reference: &Grid) -> Grid {
    Grid::from_rows(
        reference
            .rows()
            .iter()
            .map(|row| vec![String::new(); row.len()])
            .collect(),
    )
}

/// Write `data` over `base`, growing it where `data` is larger.
///
/// Existing positions are replaced in place. A row past the end of `base`
/// starts empty, and cells past the end of a row are appended, so values
/// land left-to-right without gaps. `base` never shrinks.
pub fn overlay(mut base: Grid, data: &Grid) -> Grid {
    let rows = base.rows_mut();
    for (i, data_row) in data.rows().iter().enumerate() {
        if i >= rows.len() {
            rows.push(Vec::new());
        }
        let target = &mut rows[i];
        for (j, value) in data_row.iter().enumerate() {
            match target.get_mut(j) {
                Some(slot) => slot.clone_from(value),
                None => target.push(value.clone()),
            }
        }
    }
    base
}

/// Write payload that keeps the dimensions of `reference`:
/// `overlay(blank(reference), data)`.
///
/// With `data` empty this is `blank(reference)`, which is how a managed
/// range is cleared without touching cells outside it.
pub fn reconcile(reference: &Grid, data: &Grid) -> Grid {
    overlay(blank(reference), data)
}
