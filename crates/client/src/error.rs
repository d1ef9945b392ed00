use thiserror::Error;

/// Error type for Sheets API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never got a response (DNS, connect, timeout)
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx status, with the response body
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// Response body did not match the expected shape
    #[error("parse error: {0}")]
    Parse(String),
    /// Endpoint cannot be used as a base URL
    #[error("invalid endpoint '{0}'")]
    InvalidEndpoint(String),
}

impl ClientError {
    /// 404 from the API: the spreadsheet, sheet or range no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Http { status: 404, .. })
    }
}
