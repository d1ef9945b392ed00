use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    /// Declared values were not a list of lists.
    #[error("values must be a list of rows, found {found}")]
    NotAList { found: &'static str },
    /// A declared row was not a list.
    #[error("row {row} must be a list of cells, found {found}")]
    RowNotAList { row: usize, found: &'static str },
    /// JSON text could not be parsed at all.
    #[error("cannot parse values: {0}")]
    Json(#[from] serde_json::Error),
}
