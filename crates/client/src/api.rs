use gsheets_grid::Grid;

use crate::error::ClientError;
use crate::types::{
    ClearValuesResponse, RangeRef, SheetProperties, UpdateValuesResponse, ValueInputOption,
    ValueRange,
};

/// Value-range operations a range resource needs from the remote side.
pub trait ValuesApi {
    /// Raw `ValueRange` for a range, in the requested major dimension.
    fn fetch_value_range(&self, target: &RangeRef) -> Result<ValueRange, ClientError>;

    /// Overwrite `values` starting at the top-left of `target.range`.
    fn write_range(
        &self,
        target: &RangeRef,
        input: ValueInputOption,
        values: &Grid,
    ) -> Result<UpdateValuesResponse, ClientError>;

    /// Clear every value in the range expression.
    fn clear_range(&self, spreadsheet_id: &str, range: &str) -> Result<ClearValuesResponse, ClientError>;

    /// Current values as a string grid. Non-string cells come back as `""`.
    fn fetch_range(&self, target: &RangeRef) -> Result<Grid, ClientError> {
        let value_range = self.fetch_value_range(target)?;
        Ok(Grid::from_remote_values(&value_range.values))
    }
}

/// Sheet (tab) operations a sheet resource needs.
pub trait SheetsApi {
    /// Add a tab; returns its assigned properties.
    fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<SheetProperties, ClientError>;

    fn rename_sheet(&self, spreadsheet_id: &str, sheet_id: i64, title: &str) -> Result<(), ClientError>;

    fn delete_sheet(&self, spreadsheet_id: &str, sheet_id: i64) -> Result<(), ClientError>;

    /// Properties of every tab, in spreadsheet order.
    fn list_sheets(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>, ClientError>;
}

impl<T: ValuesApi + ?Sized> ValuesApi for &T {
    fn fetch_value_range(&self, target: &RangeRef) -> Result<ValueRange, ClientError> {
        (**self).fetch_value_range(target)
    }

    fn write_range(
        &self,
        target: &RangeRef,
        input: ValueInputOption,
        values: &Grid,
    ) -> Result<UpdateValuesResponse, ClientError> {
        (**self).write_range(target, input, values)
    }

    fn clear_range(&self, spreadsheet_id: &str, range: &str) -> Result<ClearValuesResponse, ClientError> {
        (**self).clear_range(spreadsheet_id, range)
    }
}

impl<T: SheetsApi + ?Sized> SheetsApi for &T {
    fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<SheetProperties, ClientError> {
        (**self).add_sheet(spreadsheet_id, title)
    }

    fn rename_sheet(&self, spreadsheet_id: &str, sheet_id: i64, title: &str) -> Result<(), ClientError> {
        (**self).rename_sheet(spreadsheet_id, sheet_id, title)
    }

    fn delete_sheet(&self, spreadsheet_id: &str, sheet_id: i64) -> Result<(), ClientError> {
        (**self).delete_sheet(spreadsheet_id, sheet_id)
    }

    fn list_sheets(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>, ClientError> {
        (**self).list_sheets(spreadsheet_id)
    }
}
