//! Sheets API client: the remote collaborator of the range and sheet
//! resources.
//!
//! This crate owns the wire contract: value ranges (get, update, clear) and
//! sheet properties (batch update, spreadsheet get). Resources depend only
//! on the [`ValuesApi`] / [`SheetsApi`] traits, so tests can swap in an
//! in-memory spreadsheet.
//!
//! No retries. One blocking request per call.

mod api;
mod client;
mod error;
mod types;

pub use api::{SheetsApi, ValuesApi};
pub use client::SheetsClient;
pub use error::ClientError;
pub use types::{
    AddSheetReply, BatchUpdateRequest, BatchUpdateResponse, ClearValuesResponse, MajorDimension, RangeRef,
    Reply, Request, Sheet, SheetProperties, Spreadsheet, UpdateValuesResponse, ValueInputOption,
    ValueRange,
};
