use std::path::PathBuf;

use gsheets_client::ClientError;
use gsheets_config::ConfigError;
use gsheets_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// A Sheets API call failed. `operation` names the lifecycle step.
    #[error("unable to {operation}: {source}")]
    Remote {
        operation: &'static str,
        #[source]
        source: ClientError,
    },
    /// Import ID without the `<spreadsheet_id>:<rest>` separator.
    #[error("the ID must be <spreadsheet_id>:{expected}, but it was '{id}'")]
    MalformedImportId { id: String, expected: &'static str },
    /// Import by title found no tab with that title.
    #[error("spreadsheet '{spreadsheet_id}' has no sheet titled '{title}'")]
    SheetNotFound { spreadsheet_id: String, title: String },
    /// State lacks a computed attribute the operation needs.
    #[error("state for {what} is missing '{attribute}'; import or recreate it")]
    IncompleteState { what: String, attribute: &'static str },
    /// Declared values were not a list of lists.
    #[error("invalid values: {0}")]
    Declaration(#[from] GridError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unable to configure client: {0}")]
    Client(#[source] ClientError),
}

impl ProviderError {
    /// Adapter for `map_err` at remote call sites.
    pub(crate) fn remote(operation: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| ProviderError::Remote { operation, source }
    }
}

/// Host state file and lifecycle violations.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("cannot access state file {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
    #[error("state file {} is corrupt: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("state file version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    /// Read/update/delete on an address that is not managed.
    #[error("resource '{0}' is not managed; create or import it first")]
    NotManaged(String),
    /// Create/import on an address that is already managed.
    #[error("resource '{0}' is already managed")]
    AlreadyManaged(String),
    #[error("resource '{address}' is a {found}, not a {expected}")]
    WrongType {
        address: String,
        expected: &'static str,
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_client_errors_keep_their_cause() {
        let configure = ProviderError::Client(ClientError::InvalidEndpoint("nope".into()));
        let cause = configure.source().and_then(|e| e.downcast_ref::<ClientError>());
        assert!(matches!(cause, Some(ClientError::InvalidEndpoint(e)) if e == "nope"));

        let remote = ProviderError::remote("read range")(ClientError::Network("refused".into()));
        let cause = remote.source().and_then(|e| e.downcast_ref::<ClientError>());
        assert!(matches!(cause, Some(ClientError::Network(_))));
        assert_eq!(remote.to_string(), "unable to read range: network error: refused");
    }
}
