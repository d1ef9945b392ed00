//! `range` and `sheet` lifecycle commands.

use std::io::Read;
use std::path::Path;

use gsheets_grid::Grid;
use gsheets_provider::{
    apply_range, apply_sheet, destroy_range, destroy_sheet, import_range, import_sheet,
    refresh_range, refresh_sheet, RangeModel, SheetModel,
};

use crate::{provider, print_json, with_state, CliError, GlobalArgs, RangeCommands, SheetCommands};

// ============================================================================
// range
// ============================================================================

pub fn cmd_range(global: &GlobalArgs, cmd: RangeCommands) -> Result<(), CliError> {
    let provider = provider(global)?;
    let resource = provider.range_resource();

    match cmd {
        RangeCommands::Apply {
            address,
            spreadsheet_id,
            range,
            values,
            major_dimension,
            value_input_option,
        } => {
            let values = match values {
                Some(path) => read_values(&path)?,
                None => Grid::new(),
            };
            let declared = RangeModel::new(spreadsheet_id, range, values)
                .with_major_dimension(major_dimension)
                .with_value_input_option(value_input_option);

            let action = with_state(&global.state, |store| {
                apply_range(&resource, store, &address, &declared)
            })?;
            println!("{}: {}", address, action);
            Ok(())
        }
        RangeCommands::Refresh { address } => {
            let state = with_state(&global.state, |store| refresh_range(&resource, store, &address))?;
            print_json(&state)
        }
        RangeCommands::Destroy { address } => {
            with_state(&global.state, |store| destroy_range(&resource, store, &address))?;
            println!("{}: destroyed", address);
            Ok(())
        }
        RangeCommands::Import { address, id } => {
            let state = with_state(&global.state, |store| import_range(&resource, store, &address, &id))?;
            print_json(&state)
        }
    }
}

/// Declared values from a JSON file, or stdin for `-`.
fn read_values(path: &Path) -> Result<Grid, CliError> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::args(format!("cannot read values from stdin: {}", e)))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| CliError::args(format!("{}: {}", path.display(), e)))?
    };

    Grid::from_declared_str(&text).map_err(|e| {
        CliError::args(format!("{}: {}", path.display(), e))
            .with_hint("values must be a JSON list of rows, e.g. [[\"a\", 1], [\"b\", 2]]")
    })
}

// ============================================================================
// sheet
// ============================================================================

pub fn cmd_sheet(global: &GlobalArgs, cmd: SheetCommands) -> Result<(), CliError> {
    let provider = provider(global)?;
    let resource = provider.sheet_resource();

    match cmd {
        SheetCommands::Apply { address, spreadsheet_id, title } => {
            let declared = SheetModel::new(spreadsheet_id, title);
            let action = with_state(&global.state, |store| {
                apply_sheet(&resource, store, &address, &declared)
            })?;
            println!("{}: {}", address, action);
            Ok(())
        }
        SheetCommands::Refresh { address } => {
            match with_state(&global.state, |store| refresh_sheet(&resource, store, &address))? {
                Some(state) => print_json(&state),
                None => {
                    println!("{}: gone from the spreadsheet, removed from state", address);
                    Ok(())
                }
            }
        }
        SheetCommands::Destroy { address } => {
            with_state(&global.state, |store| destroy_sheet(&resource, store, &address))?;
            println!("{}: destroyed", address);
            Ok(())
        }
        SheetCommands::Import { address, id } => {
            let state = with_state(&global.state, |store| import_sheet(&resource, store, &address, &id))?;
            print_json(&state)
        }
    }
}
