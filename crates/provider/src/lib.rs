//! Google Sheets resources, data sources and lifecycle orchestration.
//!
//! Resources are generic over the collaborator traits in `gsheets-client`,
//! so the same code runs against the real API, a mock server, or an
//! in-memory fake. Grid shaping lives in `gsheets-grid`.

pub mod data_source;
pub mod error;
pub mod function;
pub mod import;
pub mod lifecycle;
pub mod plan;
pub mod range;
pub mod sheet;
pub mod state;

pub use data_source::{RangeData, RangeDataSource, RowsData, RowsDataSource};
pub use error::{ProviderError, StateError};
pub use function::format_range;
pub use import::parse_import_id;
pub use lifecycle::{
    apply_range, apply_sheet, destroy_range, destroy_sheet, import_range, import_sheet,
    refresh_range, refresh_sheet,
};
pub use plan::PlanAction;
pub use range::{plan_range, RangeDeclaration, RangeModel, RangeResource};
pub use sheet::{plan_sheet, SheetModel, SheetResource};
pub use state::{ResourceState, StateEntry, StateFile, DEFAULT_STATE_FILE, STATE_VERSION};

use gsheets_client::SheetsClient;
use gsheets_config::ProviderConfig;
use serde::Serialize;

/// Provider type name; resource and data source names are prefixed with it.
pub const TYPE_NAME: &str = "gsheets";

/// What this provider offers, for listing by a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    pub type_name: &'static str,
    pub version: &'static str,
    pub resources: Vec<&'static str>,
    pub data_sources: Vec<&'static str>,
    pub functions: Vec<&'static str>,
}

/// A configured provider: validated settings plus an HTTP client.
pub struct Provider {
    config: ProviderConfig,
    client: SheetsClient,
}

impl Provider {
    pub fn configure(config: ProviderConfig) -> Result<Self, ProviderError> {
        config.validate()?;
        let client = SheetsClient::new(&config).map_err(ProviderError::Client)?;
        log::debug!("configured provider: {:?}", config.redacted());
        Ok(Self { config, client })
    }

    pub fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            type_name: TYPE_NAME,
            version: env!("CARGO_PKG_VERSION"),
            resources: vec![sheet::SHEET_TYPE_NAME, range::RANGE_TYPE_NAME],
            data_sources: vec![
                data_source::RANGE_DATA_SOURCE_NAME,
                data_source::ROWS_DATA_SOURCE_NAME,
            ],
            functions: vec![function::FORMAT_RANGE_NAME],
        }
    }

    pub fn range_resource(&self) -> RangeResource<&SheetsClient> {
        RangeResource::new(&self.client).with_delete_mode(self.config.range_delete)
    }

    pub fn sheet_resource(&self) -> SheetResource<&SheetsClient> {
        SheetResource::new(&self.client)
    }

    pub fn range_data_source(&self) -> RangeDataSource<&SheetsClient> {
        RangeDataSource::new(&self.client)
    }

    pub fn rows_data_source(&self) -> RowsDataSource<&SheetsClient> {
        RowsDataSource::new(&self.client)
    }
}
