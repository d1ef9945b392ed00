// gsheets - manage Google Sheets ranges and tabs as declared resources
// Resource state lives in a local JSON file (gsheets.state.json by default)

mod exit_codes;
mod ops;
mod query;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use gsheets_client::{MajorDimension, ValueInputOption};
use gsheets_config::{ConfigError, ProviderConfig};
use gsheets_provider::{Provider, ProviderError, StateError, StateFile, DEFAULT_STATE_FILE};

use exit_codes::{
    provider_exit_code, state_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "gsheets")]
#[command(about = "Manage Google Sheets ranges and tabs as declared resources")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
pub struct GlobalArgs {
    /// State file
    #[arg(long, global = true, default_value = DEFAULT_STATE_FILE)]
    pub state: PathBuf,

    /// Config file (default: <config dir>/gsheets/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Sheets API base URL; overrides the config file and GSHEETS_ENDPOINT
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage a block of cell values
    #[command(subcommand)]
    Range(RangeCommands),

    /// Manage a sheet (tab) inside a spreadsheet
    #[command(subcommand)]
    Sheet(SheetCommands),

    /// Read values without managing them
    #[command(subcommand)]
    Data(DataCommands),

    /// Print a sheet-qualified A1 range
    #[command(after_help = "\
Examples:
  gsheets format-range --title 'Q3 Budget' --range A1:C10
  # 'Q3 Budget'!A1:C10")]
    FormatRange {
        /// Sheet title
        #[arg(long)]
        title: String,

        /// A1 range within the sheet
        #[arg(long)]
        range: String,
    },

    /// Inspect local state
    #[command(subcommand)]
    State(StateCommands),

    /// Show the effective configuration (token masked)
    Config,

    /// List resource types, data sources and functions as JSON
    Schema,
}

#[derive(Subcommand)]
pub enum RangeCommands {
    /// Create, update or replace a range to match the declaration
    #[command(after_help = "\
Examples:
  gsheets range apply totals --spreadsheet-id 1AbC --range 'Data!A1:C2' --values totals.json
  echo '[[\"a\",\"b\"],[1,2]]' | gsheets range apply totals --spreadsheet-id 1AbC --range A1:B2 --values -")]
    Apply {
        /// State address
        address: String,

        #[arg(long)]
        spreadsheet_id: String,

        /// A1 range, optionally sheet-qualified
        #[arg(long)]
        range: String,

        /// JSON list of rows; `-` reads stdin. Omit for an empty range.
        #[arg(long)]
        values: Option<PathBuf>,

        /// ROWS or COLUMNS
        #[arg(long)]
        major_dimension: Option<MajorDimension>,

        /// RAW or USER_ENTERED
        #[arg(long, default_value = "USER_ENTERED")]
        value_input_option: ValueInputOption,
    },

    /// Re-read remote values into state and print them
    Refresh { address: String },

    /// Blank (or clear) the managed cells and forget the range
    Destroy { address: String },

    /// Adopt an existing range: ID is <spreadsheet_id>:<range>
    Import { address: String, id: String },
}

#[derive(Subcommand)]
pub enum SheetCommands {
    /// Create, rename or replace a sheet to match the declaration
    Apply {
        address: String,

        #[arg(long)]
        spreadsheet_id: String,

        #[arg(long)]
        title: String,
    },

    /// Re-read sheet properties into state and print them
    Refresh { address: String },

    /// Delete the sheet and forget it
    Destroy { address: String },

    /// Adopt an existing sheet: ID is <spreadsheet_id>:<title>
    Import { address: String, id: String },
}

#[derive(Subcommand)]
pub enum DataCommands {
    /// Values of a range as a list of lists
    Range {
        #[arg(long)]
        spreadsheet_id: String,

        #[arg(long)]
        range: String,

        /// ROWS or COLUMNS
        #[arg(long)]
        major_dimension: Option<MajorDimension>,
    },

    /// Rows of a range plus the unmodified JSON the API returned
    Rows {
        #[arg(long)]
        spreadsheet_id: String,

        #[arg(long)]
        range: String,
    },
}

#[derive(Subcommand)]
pub enum StateCommands {
    /// One line per managed address: `<address>\t<type>`
    List,

    /// State of one address as JSON
    Show { address: String },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\ntarget:  ", env!("TARGET"),
        "\nstate:   v1",
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let global = cli.global;

    let result = match cli.command {
        Commands::Range(cmd) => ops::cmd_range(&global, cmd),
        Commands::Sheet(cmd) => ops::cmd_sheet(&global, cmd),
        Commands::Data(cmd) => query::cmd_data(&global, cmd),
        Commands::FormatRange { title, range } => query::cmd_format_range(&title, &range),
        Commands::State(cmd) => query::cmd_state(&global, cmd),
        Commands::Config => query::cmd_config(&global),
        Commands::Schema => query::cmd_schema(),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

// ============================================================================
// Shared plumbing
// ============================================================================

/// Effective configuration: file (or defaults), env, then `--endpoint`.
pub fn load_config(global: &GlobalArgs) -> Result<ProviderConfig, CliError> {
    let mut config = match &global.config {
        Some(path) => ProviderConfig::load_from(path),
        None => ProviderConfig::load(),
    }
    .map_err(CliError::config)?;

    if let Some(endpoint) = &global.endpoint {
        config.endpoint = endpoint.clone();
    }
    Ok(config)
}

pub fn provider(global: &GlobalArgs) -> Result<Provider, CliError> {
    Provider::configure(load_config(global)?).map_err(CliError::provider)
}

/// Run `op` against the state file. The file is rewritten whenever the
/// store changed, including when a later step of `op` failed, so entries
/// for remote changes that did happen are never lost.
pub fn with_state<T>(
    path: &Path,
    op: impl FnOnce(&mut StateFile) -> Result<T, ProviderError>,
) -> Result<T, CliError> {
    let mut store = StateFile::load(path).map_err(CliError::state)?;
    let result = op(&mut store);
    if store.is_dirty() {
        store.save(path).map_err(CliError::state)?;
    }
    result.map_err(CliError::provider)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CliError::general(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn config(err: ConfigError) -> Self {
        Self {
            code: EXIT_CONFIG,
            message: err.to_string(),
            hint: Some(format!(
                "check {} or pass --config",
                ProviderConfig::config_path().display()
            )),
        }
    }

    pub fn state(err: StateError) -> Self {
        let hint = match &err {
            StateError::NotManaged(_) => Some("run `apply` or `import` first".to_string()),
            StateError::AlreadyManaged(address) => {
                Some(format!("destroy '{}' or pick another address", address))
            }
            _ => None,
        };
        Self { code: state_exit_code(&err), message: err.to_string(), hint }
    }

    /// Create error from a provider error with its registry exit code.
    pub fn provider(err: ProviderError) -> Self {
        match err {
            ProviderError::State(e) => Self::state(e),
            ProviderError::Config(e) => Self::config(e),
            other => {
                let hint = match &other {
                    ProviderError::Remote { source, .. } if matches!(
                        source,
                        gsheets_client::ClientError::Http { status: 401 | 403, .. }
                    ) => Some("set GSHEETS_ACCESS_TOKEN or access_token in the config file".to_string()),
                    ProviderError::MalformedImportId { .. } => {
                        Some("split is on the first ':'; the range itself may contain more".to_string())
                    }
                    _ => None,
                };
                Self { code: provider_exit_code(&other), message: other.to_string(), hint }
            }
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
