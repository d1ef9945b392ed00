// In-memory Sheets remote for orchestration tests.
//
// Cells are stored row-major whatever orientation a call uses. Writes land
// positionally over what is stored and trailing blanks are dropped
// afterwards, which is how the real API reports values back.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use gsheets_client::{
    ClearValuesResponse, ClientError, MajorDimension, RangeRef, SheetProperties, SheetsApi, UpdateValuesResponse,
    ValueInputOption, ValueRange, ValuesApi,
};
use gsheets_grid::{normalize, transpose, Grid};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub target: RangeRef,
    pub input: ValueInputOption,
    pub values: Grid,
}

#[derive(Default)]
pub struct FakeSheets {
    cells: RefCell<HashMap<(String, String), Grid>>,
    sheets: RefCell<Vec<SheetProperties>>,
    next_sheet_id: Cell<i64>,
    pub writes: RefCell<Vec<Write>>,
    pub clears: RefCell<Vec<(String, String)>>,
    pub reads: Cell<usize>,
    fail: Cell<bool>,
}

impl FakeSheets {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.next_sheet_id.set(1);
        fake
    }

    /// Change remote values behind the provider's back.
    pub fn set_values(&self, spreadsheet_id: &str, range: &str, values: Grid) {
        self.cells
            .borrow_mut()
            .insert(key(spreadsheet_id, range), normalize(values));
    }

    pub fn values(&self, spreadsheet_id: &str, range: &str) -> Grid {
        self.cells
            .borrow()
            .get(&key(spreadsheet_id, range))
            .cloned()
            .unwrap_or_default()
    }

    pub fn remove_sheet_externally(&self, sheet_id: i64) {
        self.sheets.borrow_mut().retain(|p| p.sheet_id() != sheet_id);
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.borrow().len()
    }

    /// Every following call fails with a 500.
    pub fn fail_from_now(&self) {
        self.fail.set(true);
    }

    pub fn calls(&self) -> usize {
        self.reads.get() + self.writes.borrow().len() + self.clears.borrow().len()
    }

    fn check(&self) -> Result<(), ClientError> {
        if self.fail.get() {
            return Err(ClientError::Http {
                status: 500,
                body: "backend error".into(),
            });
        }
        Ok(())
    }
}

fn key(spreadsheet_id: &str, range: &str) -> (String, String) {
    (spreadsheet_id.to_string(), range.to_string())
}

fn is_columns(target: &RangeRef) -> bool {
    target.major_dimension == Some(MajorDimension::Columns)
}

/// Put every written cell at its sheet position, padding with blanks.
fn write_cells(stored: &Grid, values: &Grid, columns: bool) -> Grid {
    let mut rows = stored.rows().to_vec();
    for (i, line) in values.rows().iter().enumerate() {
        for (j, value) in line.iter().enumerate() {
            let (r, c) = if columns { (j, i) } else { (i, j) };
            if rows.len() <= r {
                rows.resize(r + 1, Vec::new());
            }
            if rows[r].len() <= c {
                rows[r].resize(c + 1, String::new());
            }
            rows[r][c].clone_from(value);
        }
    }
    Grid::from_rows(rows)
}

impl ValuesApi for FakeSheets {
    fn fetch_value_range(&self, target: &RangeRef) -> Result<ValueRange, ClientError> {
        self.check()?;
        self.reads.set(self.reads.get() + 1);
        let mut grid = self.values(&target.spreadsheet_id, &target.range);
        if is_columns(target) {
            grid = normalize(transpose(&grid));
        }
        Ok(ValueRange {
            range: Some(target.range.clone()),
            major_dimension: target.major_dimension,
            values: grid
                .rows()
                .iter()
                .map(|row| row.iter().cloned().map(Value::String).collect())
                .collect(),
        })
    }

    fn write_range(
        &self,
        target: &RangeRef,
        input: ValueInputOption,
        values: &Grid,
    ) -> Result<UpdateValuesResponse, ClientError> {
        self.check()?;
        self.writes.borrow_mut().push(Write {
            target: target.clone(),
            input,
            values: values.clone(),
        });
        let stored = self.values(&target.spreadsheet_id, &target.range);
        let written = write_cells(&stored, values, is_columns(target));
        self.set_values(&target.spreadsheet_id, &target.range, written);
        Ok(UpdateValuesResponse {
            spreadsheet_id: target.spreadsheet_id.clone(),
            ..Default::default()
        })
    }

    fn clear_range(&self, spreadsheet_id: &str, range: &str) -> Result<ClearValuesResponse, ClientError> {
        self.check()?;
        self.clears
            .borrow_mut()
            .push((spreadsheet_id.to_string(), range.to_string()));
        self.cells.borrow_mut().remove(&key(spreadsheet_id, range));
        Ok(ClearValuesResponse {
            spreadsheet_id: spreadsheet_id.to_string(),
            cleared_range: Some(range.to_string()),
        })
    }
}

impl SheetsApi for FakeSheets {
    fn add_sheet(&self, _spreadsheet_id: &str, title: &str) -> Result<SheetProperties, ClientError> {
        self.check()?;
        let id = self.next_sheet_id.get();
        self.next_sheet_id.set(id + 1);
        let mut sheets = self.sheets.borrow_mut();
        let props = SheetProperties {
            sheet_id: Some(id),
            title: Some(title.to_string()),
            index: Some(sheets.len() as i64),
        };
        sheets.push(props.clone());
        Ok(props)
    }

    fn rename_sheet(&self, _spreadsheet_id: &str, sheet_id: i64, title: &str) -> Result<(), ClientError> {
        self.check()?;
        let mut sheets = self.sheets.borrow_mut();
        let props = sheets
            .iter_mut()
            .find(|p| p.sheet_id() == sheet_id)
            .ok_or(ClientError::Http {
                status: 400,
                body: "no such sheet".into(),
            })?;
        props.title = Some(title.to_string());
        Ok(())
    }

    fn delete_sheet(&self, _spreadsheet_id: &str, sheet_id: i64) -> Result<(), ClientError> {
        self.check()?;
        self.remove_sheet_externally(sheet_id);
        Ok(())
    }

    fn list_sheets(&self, _spreadsheet_id: &str) -> Result<Vec<SheetProperties>, ClientError> {
        self.check()?;
        self.reads.set(self.reads.get() + 1);
        Ok(self.sheets.borrow().clone())
    }
}
