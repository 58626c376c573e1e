//! Guest book wall: a third-party form endpoint for posting and a script endpoint
//! that returns the backing sheet as a 2D array.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::api::error::ApiError;
use crate::api::models::{cell_to_string, SheetData, WallMessage};

/// Upper bound on message length accepted by the wall form
pub const MAX_MESSAGE_LEN: usize = 500;

#[async_trait]
pub trait MessageWallApi: Send + Sync {
    /// Fetch all messages, most recent first
    async fn fetch_messages(&self) -> Result<Vec<WallMessage>, ApiError>;

    /// Post a message to the wall
    async fn post_message(&self, name: &str, message: &str) -> Result<(), ApiError>;
}

/// Endpoints and form field ids for the wall
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageWallEndpoints {
    pub form_url: String,
    pub script_url: String,
    pub name_field: String,
    pub message_field: String,
}

#[derive(Clone)]
pub struct HttpMessageWall {
    endpoints: MessageWallEndpoints,
    client: Client,
}

impl HttpMessageWall {
    pub fn new(
        endpoints: MessageWallEndpoints,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        if endpoints.script_url.trim().is_empty() {
            return Err(ApiError::Config(
                "message wall script URL is empty".to_string(),
            ));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self { endpoints, client })
    }
}

#[async_trait]
impl MessageWallApi for HttpMessageWall {
    async fn fetch_messages(&self) -> Result<Vec<WallMessage>, ApiError> {
        let endpoint = self.endpoints.script_url.as_str();
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| ApiError::transport(endpoint, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::transport(endpoint, e))?;
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        let sheet: SheetData =
            serde_json::from_str(&text).map_err(|e| ApiError::decode(endpoint, e))?;
        Ok(parse_sheet_messages(&sheet))
    }

    async fn post_message(&self, name: &str, message: &str) -> Result<(), ApiError> {
        let endpoint = self.endpoints.form_url.as_str();
        if endpoint.trim().is_empty() {
            return Err(ApiError::Config(
                "message wall form URL is empty".to_string(),
            ));
        }
        let params = [
            (self.endpoints.name_field.as_str(), name),
            (self.endpoints.message_field.as_str(), message),
        ];

        // The form host answers opaquely; only transport failures count
        let response = self
            .client
            .post(endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| ApiError::transport(endpoint, e))?;

        tracing::debug!(status = %response.status(), "Message wall form accepted post");
        Ok(())
    }
}

/// Turn the sheet rows into messages, newest first.
///
/// Columns are located by header text; a missing column yields empty strings.
pub fn parse_sheet_messages(sheet: &SheetData) -> Vec<WallMessage> {
    let Some((header, entries)) = sheet.rows.split_first() else {
        return Vec::new();
    };

    let find = |needle: &str| {
        header
            .iter()
            .position(|h| cell_to_string(h).to_lowercase().contains(needle))
    };
    let idx_name = find("name");
    let idx_message = find("message");
    let idx_time = find("timestamp");

    let cell = |row: &[serde_json::Value], idx: Option<usize>| {
        idx.and_then(|i| row.get(i))
            .map(cell_to_string)
            .unwrap_or_default()
    };

    entries
        .iter()
        .rev()
        .map(|row| WallMessage {
            timestamp: cell(row, idx_time),
            name: cell(row, idx_name),
            message: cell(row, idx_message),
        })
        .collect()
}
