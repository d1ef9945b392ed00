//! The sheet resource: one tab inside an existing spreadsheet.

use gsheets_client::{SheetProperties, SheetsApi};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::import::parse_import_id;
use crate::plan::PlanAction;

pub const SHEET_TYPE_NAME: &str = "gsheets_sheet";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetModel {
    pub spreadsheet_id: String,
    pub title: String,
    /// Assigned by the API on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

impl SheetModel {
    pub fn new(spreadsheet_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            title: title.into(),
            sheet_id: None,
            index: None,
        }
    }

    fn from_properties(spreadsheet_id: &str, props: &SheetProperties) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.to_string(),
            title: props.title().to_string(),
            sheet_id: Some(props.sheet_id()),
            index: Some(props.index()),
        }
    }

    fn require_sheet_id(&self) -> Result<i64, ProviderError> {
        self.sheet_id.ok_or_else(|| ProviderError::IncompleteState {
            what: format!("sheet '{}'", self.title),
            attribute: "sheet_id",
        })
    }
}

/// Lifecycle operations for sheets over any [`SheetsApi`].
pub struct SheetResource<C> {
    client: C,
}

impl<C: SheetsApi> SheetResource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn create(&self, planned: &SheetModel) -> Result<SheetModel, ProviderError> {
        let props = self
            .client
            .add_sheet(&planned.spreadsheet_id, &planned.title)
            .map_err(ProviderError::remote("create sheet"))?;
        log::info!(
            "created sheet '{}' (id {}) in {}",
            planned.title,
            props.sheet_id(),
            planned.spreadsheet_id
        );
        Ok(SheetModel {
            title: planned.title.clone(),
            ..SheetModel::from_properties(&planned.spreadsheet_id, &props)
        })
    }

    /// Current properties, or `None` when the tab (or its whole
    /// spreadsheet) no longer exists.
    pub fn read(&self, state: &SheetModel) -> Result<Option<SheetModel>, ProviderError> {
        let sheet_id = state.require_sheet_id()?;
        let sheets = match self.client.list_sheets(&state.spreadsheet_id) {
            Ok(sheets) => sheets,
            Err(e) if e.is_not_found() => {
                log::warn!("spreadsheet {} is gone", state.spreadsheet_id);
                return Ok(None);
            }
            Err(source) => {
                return Err(ProviderError::Remote {
                    operation: "read sheet",
                    source,
                })
            }
        };
        let found = sheets
            .iter()
            .find(|p| p.sheet_id() == sheet_id)
            .map(|p| SheetModel::from_properties(&state.spreadsheet_id, p));
        if found.is_none() {
            log::warn!("sheet {} is gone from {}", sheet_id, state.spreadsheet_id);
        }
        Ok(found)
    }

    /// Only the title is mutable in place.
    pub fn update(&self, prior: &SheetModel, planned: &SheetModel) -> Result<SheetModel, ProviderError> {
        let sheet_id = prior.require_sheet_id()?;
        self.client
            .rename_sheet(&prior.spreadsheet_id, sheet_id, &planned.title)
            .map_err(ProviderError::remote("update sheet"))?;
        log::info!("renamed sheet {} to '{}'", sheet_id, planned.title);
        Ok(SheetModel {
            title: planned.title.clone(),
            ..prior.clone()
        })
    }

    pub fn delete(&self, state: &SheetModel) -> Result<(), ProviderError> {
        let sheet_id = state.require_sheet_id()?;
        self.client
            .delete_sheet(&state.spreadsheet_id, sheet_id)
            .map_err(ProviderError::remote("delete sheet"))?;
        log::info!("deleted sheet {} from {}", sheet_id, state.spreadsheet_id);
        Ok(())
    }

    /// Adopt an existing tab from `<spreadsheet_id>:<title>`. The first tab
    /// with that exact title wins.
    pub fn import(&self, id: &str) -> Result<SheetModel, ProviderError> {
        let (spreadsheet_id, title) = parse_import_id(id, "<title>")?;
        let sheets = self
            .client
            .list_sheets(spreadsheet_id)
            .map_err(ProviderError::remote("import sheet"))?;
        sheets
            .iter()
            .find(|p| p.title() == title)
            .map(|p| SheetModel::from_properties(spreadsheet_id, p))
            .ok_or_else(|| ProviderError::SheetNotFound {
                spreadsheet_id: spreadsheet_id.to_string(),
                title: title.to_string(),
            })
    }
}

/// A new spreadsheet forces replacement; a new title renames in place.
pub fn plan_sheet(prior: Option<&SheetModel>, declared: &SheetModel) -> PlanAction {
    match prior {
        None => PlanAction::Create,
        Some(p) if p.spreadsheet_id != declared.spreadsheet_id => PlanAction::Replace(vec!["spreadsheet_id"]),
        Some(p) if p.title != declared.title => PlanAction::Update,
        Some(_) => PlanAction::NoOp,
    }
}
