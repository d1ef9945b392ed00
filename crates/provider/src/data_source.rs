//! Read-only views of spreadsheet values.

use gsheets_client::{MajorDimension, RangeRef, ValuesApi};
use gsheets_grid::Grid;
use serde::Serialize;
use serde_json::Value;

use crate::error::ProviderError;

pub const RANGE_DATA_SOURCE_NAME: &str = "gsheets_range";
pub const ROWS_DATA_SOURCE_NAME: &str = "gsheets_rows";

/// Result of the range data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeData {
    pub spreadsheet_id: String,
    pub range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<MajorDimension>,
    pub values: Grid,
}

/// Result of the rows data source: coerced rows plus the unmodified JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowsData {
    pub spreadsheet_id: String,
    pub range: String,
    pub rows: Grid,
    /// The `values` array exactly as returned, numbers and all.
    pub raw: String,
}

pub struct RangeDataSource<C> {
    client: C,
}

impl<C: ValuesApi> RangeDataSource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn read(&self, target: &RangeRef) -> Result<RangeData, ProviderError> {
        let values = self
            .client
            .fetch_range(target)
            .map_err(ProviderError::remote("read range data"))?;
        Ok(RangeData {
            spreadsheet_id: target.spreadsheet_id.clone(),
            range: target.range.clone(),
            major_dimension: target.major_dimension,
            values,
        })
    }
}

pub struct RowsDataSource<C> {
    client: C,
}

impl<C: ValuesApi> RowsDataSource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn read(&self, spreadsheet_id: &str, range: &str) -> Result<RowsData, ProviderError> {
        let value_range = self
            .client
            .fetch_value_range(&RangeRef::new(spreadsheet_id, range))
            .map_err(ProviderError::remote("read rows"))?;
        let raw = Value::Array(value_range.values.iter().cloned().map(Value::Array).collect()).to_string();
        Ok(RowsData {
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
            rows: Grid::from_remote_values(&value_range.values),
            raw,
        })
    }
}
