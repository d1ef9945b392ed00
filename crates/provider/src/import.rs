//! Import identifiers: `<spreadsheet_id>:<rest>`, split on the first colon
//! only, so A1 ranges such as `Sheet1!A1:C3` survive intact.

use crate::error::ProviderError;

/// Split an import ID. `expected` names the part after the colon for the
/// error message (`<range>`, `<title>`).
pub fn parse_import_id<'a>(id: &'a str, expected: &'static str) -> Result<(&'a str, &'a str), ProviderError> {
    match id.split_once(':') {
        Some((spreadsheet_id, rest)) if !spreadsheet_id.is_empty() => Ok((spreadsheet_id, rest)),
        _ => Err(ProviderError::MalformedImportId {
            id: id.to_string(),
            expected,
        }),
    }
}
