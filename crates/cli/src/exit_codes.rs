//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 10-19   | remote           | Sheets API / transport failures          |
//! | 20-29   | state            | State file and resource lifecycle        |
//! | 30-39   | config           | Provider configuration                   |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `provider_exit_code`

use gsheets_client::ClientError;
use gsheets_provider::{ProviderError, StateError};

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable values file, malformed import ID.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Remote (10-19)
// =============================================================================

/// No response from the API (DNS, connection refused, timeout).
pub const EXIT_REMOTE_NETWORK: u8 = 10;

/// Credentials rejected (401/403).
pub const EXIT_REMOTE_AUTH: u8 = 11;

/// Spreadsheet, sheet or range does not exist (404), or import by title
/// found no such sheet.
pub const EXIT_REMOTE_NOT_FOUND: u8 = 12;

/// Request rejected as invalid (400), e.g. a bad A1 range.
pub const EXIT_REMOTE_VALIDATION: u8 = 13;

/// Any other non-2xx status (429, 5xx).
pub const EXIT_REMOTE_UPSTREAM: u8 = 14;

/// Response body did not have the expected shape.
pub const EXIT_REMOTE_PARSE: u8 = 15;

// =============================================================================
// State (20-29)
// =============================================================================

/// Address is not managed (refresh/destroy before apply or import).
pub const EXIT_STATE_NOT_MANAGED: u8 = 20;

/// Address is already managed (import over an existing entry).
pub const EXIT_STATE_ALREADY_MANAGED: u8 = 21;

/// Address holds a different resource type.
pub const EXIT_STATE_WRONG_TYPE: u8 = 22;

/// State file unreadable, corrupt, or from a newer version.
pub const EXIT_STATE_FILE: u8 = 23;

/// State entry lacks a computed attribute (e.g. sheet_id).
pub const EXIT_STATE_INCOMPLETE: u8 = 24;

// =============================================================================
// Config (30-39)
// =============================================================================

/// Config file unreadable or invalid.
pub const EXIT_CONFIG: u8 = 30;

// =============================================================================
// Error mapping
// =============================================================================

/// Map a client error to its exit code.
pub fn client_exit_code(err: &ClientError) -> u8 {
    match err {
        ClientError::Network(_) => EXIT_REMOTE_NETWORK,
        ClientError::Http { status, .. } => match *status {
            401 | 403 => EXIT_REMOTE_AUTH,
            404 => EXIT_REMOTE_NOT_FOUND,
            400 => EXIT_REMOTE_VALIDATION,
            _ => EXIT_REMOTE_UPSTREAM,
        },
        ClientError::Parse(_) => EXIT_REMOTE_PARSE,
        ClientError::InvalidEndpoint(_) => EXIT_CONFIG,
    }
}

/// Map a state error to its exit code.
pub fn state_exit_code(err: &StateError) -> u8 {
    match err {
        StateError::NotManaged(_) => EXIT_STATE_NOT_MANAGED,
        StateError::AlreadyManaged(_) => EXIT_STATE_ALREADY_MANAGED,
        StateError::WrongType { .. } => EXIT_STATE_WRONG_TYPE,
        StateError::Io { .. } | StateError::Parse { .. } | StateError::UnsupportedVersion { .. } => {
            EXIT_STATE_FILE
        }
    }
}

/// Map a provider error to its exit code.
pub fn provider_exit_code(err: &ProviderError) -> u8 {
    match err {
        ProviderError::Remote { source, .. } => client_exit_code(source),
        ProviderError::Client(source) => client_exit_code(source),
        ProviderError::MalformedImportId { .. } => EXIT_USAGE,
        ProviderError::Declaration(_) => EXIT_USAGE,
        ProviderError::SheetNotFound { .. } => EXIT_REMOTE_NOT_FOUND,
        ProviderError::IncompleteState { .. } => EXIT_STATE_INCOMPLETE,
        ProviderError::State(e) => state_exit_code(e),
        ProviderError::Config(_) => EXIT_CONFIG,
    }
}
