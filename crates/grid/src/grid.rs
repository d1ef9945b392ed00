use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cell::CellValue;
use crate::error::GridError;

/// One row of cell values. Rows in a grid may differ in length.
pub type Row = Vec<String>;

/// Ordered rows of string cells. No rectangularity requirement.
///
/// Serializes as a plain `[[String]]`, which is also the shape kept in
/// resource state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid(Vec<Row>);

impl Grid {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[Row] {
        &self.0
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.0
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of row `i`, or 0 past the last row.
    pub fn row_len(&self, i: usize) -> usize {
        self.0.get(i).map_or(0, Vec::len)
    }

    /// Longest row length.
    pub fn width(&self) -> usize {
        self.0.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.0.get(row)?.get(col).map(String::as_str)
    }

    /// Build a grid from the `values` of a remote `ValueRange`.
    ///
    /// Non-string cells are coerced to `""`. The count of lossy coercions
    /// (numbers, booleans; not nulls) is logged at warn level.
    pub fn from_remote_values(values: &[Vec<Value>]) -> Self {
        let mut coerced = 0usize;
        let rows = values
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| {
                        if CellValue::is_lossy_remote(v) {
                            coerced += 1;
                        }
                        CellValue::from_remote(v).into_string()
                    })
                    .collect()
            })
            .collect();
        if coerced > 0 {
            log::warn!("coerced {} non-string remote cell(s) to empty strings", coerced);
        }
        Self(rows)
    }

    /// Build a grid from declared configuration (a JSON list of lists).
    pub fn from_declared_json(value: &Value) -> Result<Self, GridError> {
        let rows = value.as_array().ok_or(GridError::NotAList {
            found: json_kind(value),
        })?;

        let mut grid = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let cells = match row {
                Value::Array(cells) => cells,
                Value::Null => {
                    grid.push(Vec::new());
                    continue;
                }
                other => {
                    return Err(GridError::RowNotAList {
                        row: i,
                        found: json_kind(other),
                    })
                }
            };
            grid.push(
                cells
                    .iter()
                    .map(|c| CellValue::from_declared(c).into_string())
                    .collect(),
            );
        }
        Ok(Self(grid))
    }

    /// Parse declared values from JSON text.
    pub fn from_declared_str(text: &str) -> Result<Self, GridError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_declared_json(&value)
    }

    /// Values as JSON for request bodies.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|row| Value::Array(row.iter().cloned().map(Value::String).collect()))
                .collect(),
        )
    }
}

impl<R, C> From<Vec<R>> for Grid
where
    R: IntoIterator<Item = C>,
    C: Into<String>,
{
    fn from(rows: Vec<R>) -> Self {
        Self(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
