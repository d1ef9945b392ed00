// Provider against a mock Sheets API over HTTP.
// Run with: cargo test -p gsheets-provider --test end_to_end

use gsheets_client::{MajorDimension, RangeRef};
use gsheets_config::{ProviderConfig, RangeDeleteMode};
use gsheets_grid::Grid;
use gsheets_provider::{
    apply_range, apply_sheet, destroy_range, refresh_range, refresh_sheet, PlanAction, Provider,
    ProviderError, RangeDeclaration, SheetModel, StateFile,
};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn provider(server: &MockServer) -> Provider {
    Provider::configure(ProviderConfig {
        endpoint: server.base_url(),
        access_token: Some("test-token".into()),
        ..ProviderConfig::default()
    })
    .unwrap()
}

fn declaration(value: serde_json::Value) -> gsheets_provider::RangeModel {
    serde_json::from_value::<RangeDeclaration>(value)
        .unwrap()
        .into_model()
        .unwrap()
}

#[test]
fn range_create_read_update_to_columns() {
    let server = MockServer::start();
    let provider = provider(&server);
    let resource = provider.range_resource();
    let mut store = StateFile::default();

    // Create: numbers in the declaration arrive as strings
    let create = server.mock(|when, then| {
        when.method(PUT)
            .path("/v4/spreadsheets/sheet-1/values/A1:C3")
            .query_param("valueInputOption", "USER_ENTERED")
            .header("authorization", "Bearer test-token")
            .json_body(json!({
                "range": "A1:C3",
                "values": [["a", "b", "c"], ["1", "2", "3"]]
            }));
        then.status(200).json_body(json!({"spreadsheetId": "sheet-1", "updatedCells": 6}));
    });
    let first = declaration(json!({
        "spreadsheet_id": "sheet-1",
        "range": "A1:C3",
        "values": [["a", "b", "c"], [1, 2, 3]]
    }));
    assert_eq!(
        apply_range(&resource, &mut store, "main", &first).unwrap(),
        PlanAction::Create
    );
    create.assert();

    // Read: two rows of three columns
    let mut read_rows = server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/sheet-1/values/A1:C3");
        then.status(200).json_body(json!({
            "range": "A1:C3",
            "majorDimension": "ROWS",
            "values": [["a", "b", "c"], ["1", "2", "3"]]
        }));
    });
    let read = refresh_range(&resource, &mut store, "main").unwrap();
    assert_eq!(read.values.len(), 2);
    assert!(read.values.rows().iter().all(|row| row.len() == 3));
    read_rows.delete();

    // Update to column-major: the prior footprint is turned to columns
    // too, so the payload covers exactly the same six cells
    let update = server.mock(|when, then| {
        when.method(PUT)
            .path("/v4/spreadsheets/sheet-1/values/A1:C3")
            .query_param("valueInputOption", "USER_ENTERED")
            .json_body(json!({
                "range": "A1:C3",
                "majorDimension": "COLUMNS",
                "values": [["a", "1"], ["b", "2"], ["c", "3"]]
            }));
        then.status(200).json_body(json!({"spreadsheetId": "sheet-1"}));
    });
    let second = declaration(json!({
        "spreadsheet_id": "sheet-1",
        "range": "A1:C3",
        "major_dimension": "COLUMNS",
        "values": [["a", "1"], ["b", "2"], ["c", "3"]]
    }));
    assert_eq!(
        apply_range(&resource, &mut store, "main", &second).unwrap(),
        PlanAction::Update
    );
    update.assert();

    // Read again: three rows of two columns
    server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/sheet-1/values/A1:C3")
            .query_param("majorDimension", "COLUMNS");
        then.status(200).json_body(json!({
            "range": "A1:C3",
            "majorDimension": "COLUMNS",
            "values": [["a", "1"], ["b", "2"], ["c", "3"]]
        }));
    });
    let read = refresh_range(&resource, &mut store, "main").unwrap();
    assert_eq!(read.values.len(), 3);
    assert!(read.values.rows().iter().all(|row| row.len() == 2));
    assert_eq!(read.major_dimension, Some(MajorDimension::Columns));
}

#[test]
fn remote_error_is_reported_and_state_survives_reload() {
    let server = MockServer::start();
    let provider = provider(&server);
    let resource = provider.range_resource();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gsheets.state.json");

    server.mock(|when, then| {
        when.method(PUT).path("/v4/spreadsheets/sheet-1/values/A1");
        then.status(200).json_body(json!({"spreadsheetId": "sheet-1"}));
    });
    let mut store = StateFile::load(&path).unwrap();
    let decl = declaration(json!({"spreadsheet_id": "sheet-1", "range": "A1", "values": [["x"]]}));
    apply_range(&resource, &mut store, "main", &decl).unwrap();
    store.save(&path).unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/sheet-1/values/A1");
        then.status(403).body(r#"{"error":{"code":403,"status":"PERMISSION_DENIED"}}"#);
    });
    let mut store = StateFile::load(&path).unwrap();
    let err = refresh_range(&resource, &mut store, "main").unwrap_err();

    assert!(err.to_string().starts_with("unable to read range"));
    assert!(!store.is_dirty());
    assert_eq!(store.require_range("main").unwrap(), &decl);
}

#[test]
fn destroy_in_clear_mode_posts_clear() {
    let server = MockServer::start();
    let provider = Provider::configure(ProviderConfig {
        endpoint: server.base_url(),
        range_delete: RangeDeleteMode::Clear,
        ..ProviderConfig::default()
    })
    .unwrap();
    let resource = provider.range_resource();
    let mut store = StateFile::default();

    server.mock(|when, then| {
        when.method(PUT).path("/v4/spreadsheets/s/values/Data!A:B");
        then.status(200).json_body(json!({"spreadsheetId": "s"}));
    });
    let clear = server.mock(|when, then| {
        when.method(POST).path("/v4/spreadsheets/s/values/Data!A:B:clear");
        then.status(200).json_body(json!({"spreadsheetId": "s", "clearedRange": "Data!A1:B1000"}));
    });

    let decl = declaration(json!({"spreadsheet_id": "s", "range": "Data!A:B", "values": [["a", "b"]]}));
    apply_range(&resource, &mut store, "main", &decl).unwrap();
    destroy_range(&resource, &mut store, "main").unwrap();

    clear.assert();
    assert!(!store.is_managed("main"));
}

#[test]
fn sheet_create_uses_batch_update_reply() {
    let server = MockServer::start();
    let provider = provider(&server);
    let mut store = StateFile::default();

    server.mock(|when, then| {
        when.method(POST)
            .path("/v4/spreadsheets/s:batchUpdate")
            .json_body(json!({"requests": [{"addSheet": {"properties": {"title": "test title"}}}]}));
        then.status(200).json_body(json!({
            "spreadsheetId": "s",
            "replies": [{"addSheet": {"properties": {"sheetId": 1234, "title": "test title", "index": 1}}}]
        }));
    });

    apply_sheet(
        &provider.sheet_resource(),
        &mut store,
        "tab",
        &SheetModel::new("s", "test title"),
    )
    .unwrap();

    let sheet = store.require_sheet("tab").unwrap();
    assert_eq!(sheet.sheet_id, Some(1234));
    assert_eq!(sheet.index, Some(1));
}

#[test]
fn sheet_refresh_drops_state_when_spreadsheet_is_gone() {
    let server = MockServer::start();
    let provider = provider(&server);
    let resource = provider.sheet_resource();
    let mut store = StateFile::default();

    server.mock(|when, then| {
        when.method(POST).path("/v4/spreadsheets/s:batchUpdate");
        then.status(200).json_body(json!({
            "spreadsheetId": "s",
            "replies": [{"addSheet": {"properties": {"sheetId": 7, "title": "tab", "index": 0}}}]
        }));
    });
    apply_sheet(&resource, &mut store, "tab", &SheetModel::new("s", "tab")).unwrap();

    let list = server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/s");
        then.status(404)
            .json_body(json!({"error": {"code": 404, "status": "NOT_FOUND"}}));
    });
    assert_eq!(refresh_sheet(&resource, &mut store, "tab").unwrap(), None);
    list.assert();
    assert!(!store.is_managed("tab"));
}

#[test]
fn sheet_refresh_keeps_state_on_server_error() {
    let server = MockServer::start();
    let provider = provider(&server);
    let resource = provider.sheet_resource();
    let mut store = StateFile::default();

    server.mock(|when, then| {
        when.method(POST).path("/v4/spreadsheets/s:batchUpdate");
        then.status(200).json_body(json!({
            "spreadsheetId": "s",
            "replies": [{"addSheet": {"properties": {"sheetId": 7, "title": "tab", "index": 0}}}]
        }));
    });
    apply_sheet(&resource, &mut store, "tab", &SheetModel::new("s", "tab")).unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/s");
        then.status(503).body("unavailable");
    });
    let err = refresh_sheet(&resource, &mut store, "tab").unwrap_err();
    assert!(matches!(err, ProviderError::Remote { operation: "read sheet", .. }));
    assert!(store.is_managed("tab"));
}

#[test]
fn range_data_source_honors_major_dimension() {
    let server = MockServer::start();
    let provider = provider(&server);
    server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/s/values/A1:B3")
            .query_param("majorDimension", "COLUMNS");
        then.status(200).json_body(json!({
            "majorDimension": "COLUMNS",
            "values": [["a", "b", "c"], ["1", 2, null]]
        }));
    });

    let target = RangeRef::new("s", "A1:B3").with_major_dimension(Some(MajorDimension::Columns));
    let data = provider.range_data_source().read(&target).unwrap();

    assert_eq!(data.values, Grid::from(vec![vec!["a", "b", "c"], vec!["1", "", ""]]));
    assert_eq!(data.major_dimension, Some(MajorDimension::Columns));
}

#[test]
fn rows_data_source_keeps_raw_json() {
    let server = MockServer::start();
    let provider = provider(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v4/spreadsheets/s/values/Data!A:C");
        then.status(200).json_body(json!({"values": [["a", 1, true], ["b"]]}));
    });

    let data = provider.rows_data_source().read("s", "Data!A:C").unwrap();

    assert_eq!(data.rows, Grid::from(vec![vec!["a", "", ""], vec!["b"]]));
    assert_eq!(data.raw, r#"[["a",1,true],["b"]]"#);
}
