//! `gsheets-grid`: cell-value grids and dimension reconciliation.
//!
//! Pure crate: receives grids already built from configuration or a remote
//! snapshot, returns the grid to store or to send. No HTTP, no state files.
//!
//! The three operations every range lifecycle is built from:
//! - [`normalize`]: trim trailing blanks the way the Sheets API does
//! - [`blank`] / [`overlay`]: reshape and overwrite
//! - [`reconcile`]: `overlay(blank(reference), data)`, the write payload
//!
//! [`transpose`] moves a stored grid between row- and column-major layout
//! before it is reconciled against data in the other orientation.

pub mod cell;
pub mod error;
pub mod grid;
pub mod merge;
pub mod normalize;
pub mod transpose;

pub use cell::CellValue;
pub use error::GridError;
pub use grid::{Grid, Row};
pub use merge::{blank, overlay, reconcile};
pub use normalize::{drop_trailing_blank_rows, is_blank, normalize, trim_trailing_blanks};
pub use transpose::transpose;
