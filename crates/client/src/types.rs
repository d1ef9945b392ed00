//! Sheets v4 wire types (only the fields the resources use).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Enums ───────────────────────────────────────────────────────────

/// Whether the outer list of a value grid holds rows or columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorDimension {
    Rows,
    Columns,
}

impl MajorDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rows => "ROWS",
            Self::Columns => "COLUMNS",
        }
    }
}

impl fmt::Display for MajorDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MajorDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROWS" => Ok(Self::Rows),
            "COLUMNS" => Ok(Self::Columns),
            other => Err(format!("major dimension must be ROWS or COLUMNS, got '{other}'")),
        }
    }
}

/// How written strings are interpreted by the spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Stored exactly as given
    Raw,
    /// Parsed as if typed into the UI (formulas, numbers, dates)
    #[default]
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::UserEntered => "USER_ENTERED",
        }
    }
}

impl fmt::Display for ValueInputOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueInputOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RAW" => Ok(Self::Raw),
            "USER_ENTERED" => Ok(Self::UserEntered),
            other => Err(format!("value input option must be RAW or USER_ENTERED, got '{other}'")),
        }
    }
}

// ── Range reference ─────────────────────────────────────────────────

/// Where a grid lives: spreadsheet, A1 range expression, traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRef {
    pub spreadsheet_id: String,
    pub range: String,
    pub major_dimension: Option<MajorDimension>,
}

impl RangeRef {
    pub fn new(spreadsheet_id: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            major_dimension: None,
        }
    }

    pub fn with_major_dimension(mut self, major_dimension: Option<MajorDimension>) -> Self {
        self.major_dimension = major_dimension;
        self
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.spreadsheet_id, self.range)
    }
}

// ── Values ──────────────────────────────────────────────────────────

/// `ValueRange` resource. Cells are kept as raw JSON here; they are
/// coerced to strings when a grid is built from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<MajorDimension>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: Option<u64>,
    #[serde(default)]
    pub updated_columns: Option<u64>,
    #[serde(default)]
    pub updated_cells: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearValuesResponse {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub cleared_range: Option<String>,
}

// ── Sheets ──────────────────────────────────────────────────────────

/// Proto3 JSON drops zero values, so the first sheet arrives without
/// `sheetId` / `index`; both default to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

impl SheetProperties {
    pub fn sheet_id(&self) -> i64 {
        self.sheet_id.unwrap_or(0)
    }

    pub fn index(&self) -> i64 {
        self.index.unwrap_or(0)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    #[serde(default)]
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

/// One entry of `batchUpdate.requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    AddSheet {
        properties: SheetProperties,
    },
    #[serde(rename_all = "camelCase")]
    UpdateSheetProperties {
        properties: SheetProperties,
        fields: String,
    },
    #[serde(rename_all = "camelCase")]
    DeleteSheet {
        sheet_id: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSheetReply {
    #[serde(default)]
    pub properties: SheetProperties,
}

/// One entry of `batchUpdate.replies`. Requests without a reply payload
/// come back as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_sheet: Option<AddSheetReply>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub replies: Vec<Reply>,
}
