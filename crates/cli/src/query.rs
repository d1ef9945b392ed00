//! Read-only commands: data sources, format-range, state and config views.

use gsheets_client::RangeRef;
use gsheets_provider::{format_range, Provider, StateFile};

use crate::{load_config, print_json, provider, CliError, DataCommands, GlobalArgs, StateCommands};

pub fn cmd_data(global: &GlobalArgs, cmd: DataCommands) -> Result<(), CliError> {
    let provider = provider(global)?;
    match cmd {
        DataCommands::Range { spreadsheet_id, range, major_dimension } => {
            let target = RangeRef::new(spreadsheet_id, range).with_major_dimension(major_dimension);
            let data = provider
                .range_data_source()
                .read(&target)
                .map_err(CliError::provider)?;
            print_json(&data)
        }
        DataCommands::Rows { spreadsheet_id, range } => {
            let data = provider
                .rows_data_source()
                .read(&spreadsheet_id, &range)
                .map_err(CliError::provider)?;
            print_json(&data)
        }
    }
}

pub fn cmd_format_range(title: &str, range: &str) -> Result<(), CliError> {
    println!("{}", format_range(title, range));
    Ok(())
}

pub fn cmd_state(global: &GlobalArgs, cmd: StateCommands) -> Result<(), CliError> {
    let store = StateFile::load(&global.state).map_err(CliError::state)?;
    match cmd {
        StateCommands::List => {
            for address in store.addresses() {
                if let Some(resource) = store.get(address) {
                    println!("{}\t{}", address, resource.kind());
                }
            }
            Ok(())
        }
        StateCommands::Show { address } => match store.resources.get(&address) {
            Some(entry) => print_json(entry),
            None => Err(CliError::state(gsheets_provider::StateError::NotManaged(address))),
        },
    }
}

pub fn cmd_config(global: &GlobalArgs) -> Result<(), CliError> {
    let config = load_config(global)?;
    config.validate().map_err(CliError::config)?;
    print_json(&config.redacted())
}

pub fn cmd_schema() -> Result<(), CliError> {
    print_json(&Provider::metadata())
}
