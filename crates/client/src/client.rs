//! Sheets v4 HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! Covers values get / update / clear and the sheet batch updates used by
//! the sheet resource.

use std::time::Duration;

use gsheets_config::ProviderConfig;
use gsheets_grid::Grid;
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::api::{SheetsApi, ValuesApi};
use crate::error::ClientError;
use crate::types::{
    BatchUpdateRequest, BatchUpdateResponse, ClearValuesResponse, RangeRef, Request,
    SheetProperties, Spreadsheet, UpdateValuesResponse, ValueInputOption, ValueRange,
};

/// Sheets API client (blocking).
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::blocking::Client,
    base: Url,
    token: Option<String>,
}

impl SheetsClient {
    /// Create a client from provider configuration.
    pub fn new(config: &ProviderConfig) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base: parse_base(&config.endpoint)?,
            token: config.access_token.clone(),
        })
    }

    /// Unauthenticated client against an explicit base URL (mock servers).
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Self::new(&ProviderConfig {
            endpoint: base_url.to_string(),
            ..ProviderConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    // ── URLs ────────────────────────────────────────────────────────

    /// `{base}/v4/spreadsheets/{segments...}`, each segment percent-encoded.
    fn spreadsheet_url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidEndpoint(self.base.to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(segments);
        Ok(url)
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url, ClientError> {
        self.spreadsheet_url(&[spreadsheet_id, "values", range])
    }

    fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: Vec<Request>,
    ) -> Result<BatchUpdateResponse, ClientError> {
        let url = self.spreadsheet_url(&[&format!("{}:batchUpdate", spreadsheet_id)])?;
        let body = BatchUpdateRequest { requests };
        let resp = self.send(self.http.post(url).json(&body))?;
        parse_json(resp)
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn send(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let req = match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let response = req.send().map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            log::debug!("sheets API returned {}: {}", status, body);
            return Err(ClientError::Http { status, body });
        }

        Ok(response)
    }
}

impl ValuesApi for SheetsClient {
    fn fetch_value_range(&self, target: &RangeRef) -> Result<ValueRange, ClientError> {
        let mut url = self.values_url(&target.spreadsheet_id, &target.range)?;
        if let Some(dim) = target.major_dimension {
            url.query_pairs_mut().append_pair("majorDimension", dim.as_str());
        }
        log::debug!("GET {}", url);
        let resp = self.send(self.http.get(url))?;
        parse_json(resp)
    }

    fn write_range(
        &self,
        target: &RangeRef,
        input: ValueInputOption,
        values: &Grid,
    ) -> Result<UpdateValuesResponse, ClientError> {
        let mut url = self.values_url(&target.spreadsheet_id, &target.range)?;
        url.query_pairs_mut().append_pair("valueInputOption", input.as_str());

        let body = ValueRange {
            range: Some(target.range.clone()),
            major_dimension: target.major_dimension,
            values: values
                .rows()
                .iter()
                .map(|row| row.iter().cloned().map(serde_json::Value::String).collect())
                .collect(),
        };

        log::debug!("PUT {} ({} row(s))", url, values.len());
        let resp = self.send(self.http.put(url).json(&body))?;
        parse_json(resp)
    }

    fn clear_range(&self, spreadsheet_id: &str, range: &str) -> Result<ClearValuesResponse, ClientError> {
        let url = self.spreadsheet_url(&[spreadsheet_id, "values", &format!("{}:clear", range)])?;
        log::debug!("POST {}", url);
        let resp = self.send(self.http.post(url).json(&serde_json::json!({})))?;
        parse_json(resp)
    }
}

impl SheetsApi for SheetsClient {
    fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<SheetProperties, ClientError> {
        let resp = self.batch_update(
            spreadsheet_id,
            vec![Request::AddSheet {
                properties: SheetProperties {
                    title: Some(title.to_string()),
                    ..Default::default()
                },
            }],
        )?;

        resp.replies
            .into_iter()
            .next()
            .and_then(|r| r.add_sheet)
            .map(|r| r.properties)
            .ok_or_else(|| ClientError::Parse("Missing addSheet reply in response".into()))
    }

    fn rename_sheet(&self, spreadsheet_id: &str, sheet_id: i64, title: &str) -> Result<(), ClientError> {
        self.batch_update(
            spreadsheet_id,
            vec![Request::UpdateSheetProperties {
                properties: SheetProperties {
                    sheet_id: Some(sheet_id),
                    title: Some(title.to_string()),
                    index: None,
                },
                fields: "title".into(),
            }],
        )?;
        Ok(())
    }

    fn delete_sheet(&self, spreadsheet_id: &str, sheet_id: i64) -> Result<(), ClientError> {
        self.batch_update(spreadsheet_id, vec![Request::DeleteSheet { sheet_id }])?;
        Ok(())
    }

    fn list_sheets(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>, ClientError> {
        let mut url = self.spreadsheet_url(&[spreadsheet_id])?;
        url.query_pairs_mut()
            .append_pair("fields", "spreadsheetId,sheets.properties");
        let resp = self.send(self.http.get(url))?;
        let spreadsheet: Spreadsheet = parse_json(resp)?;
        Ok(spreadsheet.sheets.into_iter().map(|s| s.properties).collect())
    }
}

// ── Free functions ──────────────────────────────────────────────────

fn parse_base(endpoint: &str) -> Result<Url, ClientError> {
    let url = Url::parse(endpoint).map_err(|_| ClientError::InvalidEndpoint(endpoint.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidEndpoint(endpoint.to_string()));
    }
    Ok(url)
}

fn parse_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    resp.json::<T>().map_err(|e| ClientError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building_encodes_range() {
        let client = SheetsClient::with_base_url("https://sheets.googleapis.com/").unwrap();
        let url = client.values_url("abc123", "'My Sheet'!A1:C3").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/'My%20Sheet'!A1:C3"
        );
    }

    #[test]
    fn test_url_building_keeps_base_path() {
        let client = SheetsClient::with_base_url("http://localhost:8080/proxy/").unwrap();
        let url = client.spreadsheet_url(&["abc:batchUpdate"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/v4/spreadsheets/abc:batchUpdate");
    }

    #[test]
    fn test_slash_in_range_is_escaped() {
        let client = SheetsClient::with_base_url("http://localhost").unwrap();
        let url = client.values_url("id", "a/b!A1").unwrap();
        assert!(url.path().ends_with("/values/a%2Fb!A1"));
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            SheetsClient::with_base_url("not a url"),
            Err(ClientError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            SheetsClient::with_base_url("mailto:someone@example.com"),
            Err(ClientError::InvalidEndpoint(_))
        ));
    }
}
