//! The range resource: a rectangular block of cell values.
//!
//! The provider only ever owns the cells it has written. Every remote
//! write after create is shaped by [`reconcile`] so that cells no longer
//! declared are blanked instead of left behind, and cells outside the
//! declaration's footprint are never touched.

use gsheets_client::{MajorDimension, RangeRef, ValueInputOption, ValuesApi};
use gsheets_config::RangeDeleteMode;
use gsheets_grid::{normalize, reconcile, transpose, Grid};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;
use crate::import::parse_import_id;
use crate::plan::PlanAction;

pub const RANGE_TYPE_NAME: &str = "gsheets_range";

/// Declared configuration and stored state of one range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeModel {
    pub spreadsheet_id: String,
    /// A1 notation, optionally sheet-qualified (`'Sheet 1'!A1:C3`).
    pub range: String,
    #[serde(default)]
    pub value_input_option: ValueInputOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<MajorDimension>,
    #[serde(default)]
    pub values: Grid,
}

impl RangeModel {
    pub fn new(spreadsheet_id: impl Into<String>, range: impl Into<String>, values: Grid) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            value_input_option: ValueInputOption::default(),
            major_dimension: None,
            values,
        }
    }

    pub fn with_major_dimension(mut self, major_dimension: Option<MajorDimension>) -> Self {
        self.major_dimension = major_dimension;
        self
    }

    pub fn with_value_input_option(mut self, option: ValueInputOption) -> Self {
        self.value_input_option = option;
        self
    }

    pub fn target(&self) -> RangeRef {
        RangeRef::new(&self.spreadsheet_id, &self.range).with_major_dimension(self.major_dimension)
    }

    /// Stored values laid out for writing with `major_dimension`. Unset
    /// means rows.
    pub fn values_as(&self, major_dimension: Option<MajorDimension>) -> Grid {
        let ours = self.major_dimension.unwrap_or(MajorDimension::Rows);
        if ours == major_dimension.unwrap_or(MajorDimension::Rows) {
            self.values.clone()
        } else {
            transpose(&self.values)
        }
    }

    /// `<spreadsheet_id>:<range>`, the same form import accepts.
    pub fn id(&self) -> String {
        format!("{}:{}", self.spreadsheet_id, self.range)
    }
}

/// A range as written by a user: `values` may hold numbers, booleans and
/// nulls, which are converted to strings before anything else sees them.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeDeclaration {
    pub spreadsheet_id: String,
    pub range: String,
    #[serde(default)]
    pub value_input_option: ValueInputOption,
    #[serde(default)]
    pub major_dimension: Option<MajorDimension>,
    #[serde(default)]
    pub values: Value,
}

impl RangeDeclaration {
    pub fn into_model(self) -> Result<RangeModel, ProviderError> {
        let values = match &self.values {
            Value::Null => Grid::new(),
            v => Grid::from_declared_json(v)?,
        };
        Ok(RangeModel {
            spreadsheet_id: self.spreadsheet_id,
            range: self.range,
            value_input_option: self.value_input_option,
            major_dimension: self.major_dimension,
            values,
        })
    }
}

/// Lifecycle operations for ranges over any [`ValuesApi`].
pub struct RangeResource<C> {
    client: C,
    delete_mode: RangeDeleteMode,
}

impl<C: ValuesApi> RangeResource<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            delete_mode: RangeDeleteMode::default(),
        }
    }

    pub fn with_delete_mode(mut self, mode: RangeDeleteMode) -> Self {
        self.delete_mode = mode;
        self
    }

    /// Write the declared values verbatim. State is the declaration.
    pub fn create(&self, planned: &RangeModel) -> Result<RangeModel, ProviderError> {
        log::info!("creating range {} ({} row(s))", planned.id(), planned.values.len());
        self.client
            .write_range(&planned.target(), planned.value_input_option, &planned.values)
            .map_err(ProviderError::remote("create range"))?;
        Ok(planned.clone())
    }

    /// Refresh state from the remote, keeping the footprint of what state
    /// already recorded so that cells blanked remotely show up as drift.
    pub fn read(&self, state: &RangeModel) -> Result<RangeModel, ProviderError> {
        let remote = self
            .client
            .fetch_range(&state.target())
            .map_err(ProviderError::remote("read range"))?;
        log::debug!("read {} row(s) for range {}: {:?}", remote.len(), state.id(), remote);
        Ok(RangeModel {
            values: reconcile(&state.values, &remote),
            ..state.clone()
        })
    }

    /// Write the new values over a blanked copy of the prior footprint,
    /// turned to the new orientation first if the major dimension changed.
    /// State becomes the new declaration verbatim, not the padded payload.
    pub fn update(&self, prior: &RangeModel, planned: &RangeModel) -> Result<RangeModel, ProviderError> {
        let footprint = prior.values_as(planned.major_dimension);
        let payload = reconcile(&footprint, &planned.values);
        log::debug!("reconciled {:?} with {:?} into {:?}", footprint, planned.values, payload);
        let target = RangeRef::new(&prior.spreadsheet_id, &prior.range)
            .with_major_dimension(planned.major_dimension);
        log::info!(
            "updating range {} ({} row(s), {} declared)",
            prior.id(),
            payload.len(),
            planned.values.len()
        );
        let resp = self
            .client
            .write_range(&target, planned.value_input_option, &payload)
            .map_err(ProviderError::remote("update range"))?;

        let spreadsheet_id = if resp.spreadsheet_id.is_empty() {
            prior.spreadsheet_id.clone()
        } else {
            resp.spreadsheet_id
        };
        Ok(RangeModel {
            spreadsheet_id,
            range: prior.range.clone(),
            ..planned.clone()
        })
    }

    /// Blank every cell in the prior footprint, or clear the whole range
    /// expression when configured to.
    pub fn delete(&self, state: &RangeModel) -> Result<(), ProviderError> {
        match self.delete_mode {
            RangeDeleteMode::Blank => {
                let payload = reconcile(&state.values, &Grid::new());
                log::info!("blanking range {} ({} row(s))", state.id(), payload.len());
                self.client
                    .write_range(&state.target(), state.value_input_option, &payload)
                    .map_err(ProviderError::remote("delete range"))?;
            }
            RangeDeleteMode::Clear => {
                log::info!("clearing range {}", state.id());
                self.client
                    .clear_range(&state.spreadsheet_id, &state.range)
                    .map_err(ProviderError::remote("delete range"))?;
            }
        }
        Ok(())
    }

    /// Adopt an existing range from `<spreadsheet_id>:<range>`.
    pub fn import(&self, id: &str) -> Result<RangeModel, ProviderError> {
        let (spreadsheet_id, range) = parse_import_id(id, "<range>")?;
        let model = RangeModel::new(spreadsheet_id, range, Grid::new());
        let values = self
            .client
            .fetch_range(&model.target())
            .map_err(ProviderError::remote("import range"))?;
        log::info!("imported range {} ({} row(s))", id, values.len());
        Ok(RangeModel { values, ..model })
    }
}

/// Decide what apply does. Changing where the range lives forces
/// replacement; values compare after trailing-blank trimming.
pub fn plan_range(prior: Option<&RangeModel>, declared: &RangeModel) -> PlanAction {
    let Some(prior) = prior else {
        return PlanAction::Create;
    };

    let mut forced = Vec::new();
    if prior.spreadsheet_id != declared.spreadsheet_id {
        forced.push("spreadsheet_id");
    }
    if prior.range != declared.range {
        forced.push("range");
    }
    if !forced.is_empty() {
        return PlanAction::Replace(forced);
    }

    let same = prior.value_input_option == declared.value_input_option
        && prior.major_dimension == declared.major_dimension
        && normalize(prior.values.clone()) == normalize(declared.values.clone());
    if same {
        PlanAction::NoOp
    } else {
        PlanAction::Update
    }
}
