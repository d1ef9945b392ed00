//! Cell ingestion.
//!
//! The Sheets API and configuration files both hand us loosely typed JSON.
//! Every cell is resolved to a [`CellValue`] exactly once, right after
//! deserialization, and from then on grids hold plain strings.

use serde_json::Value;

/// A single cell as seen at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellValue {
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// Cell from a remote `ValueRange`. Anything that is not a JSON string
    /// (numbers, booleans, null) becomes [`CellValue::Empty`].
    pub fn from_remote(value: &Value) -> Self {
        match value {
            Value::String(s) => CellValue::Text(s.clone()),
            _ => CellValue::Empty,
        }
    }

    /// Cell from declared configuration. Scalars are converted to their
    /// textual form (`1` -> `"1"`, `true` -> `"true"`), null is empty.
    pub fn from_declared(value: &Value) -> Self {
        match value {
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Number(n) => CellValue::Text(n.to_string()),
            Value::Bool(b) => CellValue::Text(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => CellValue::Empty,
        }
    }

    /// True when this cell was coerced from a non-string, non-null value.
    pub(crate) fn is_lossy_remote(value: &Value) -> bool {
        !matches!(value, Value::String(_) | Value::Null)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CellValue::Text(s) => s,
            CellValue::Empty => "",
        }
    }

    pub fn into_string(self) -> String {
        match self {
            CellValue::Text(s) => s,
            CellValue::Empty => String::new(),
        }
    }
}
