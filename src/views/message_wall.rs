use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime};
use parking_lot::Mutex;
use thiserror::Error;

use crate::api::{ApiError, MessageWallApi, WallMessage, MAX_MESSAGE_LEN};
use crate::rsvp::ValidationError;
use crate::views::LoadState;

pub const LOAD_FAILED: &str = "Failed to load messages";
pub const POST_SENT: &str = "Message sent! Your wishes have been delivered.";
pub const POST_FAILED: &str = "Unable to send message. Please try again in a moment.";

const DISPLAY_FORMAT: &str = "%b %-d, %Y, %H:%M";
const SHEET_FORMATS: &[&str] = &["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Error)]
pub enum PostError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("API request failed: {0}")]
    Api(#[from] ApiError),
}

/// Render a sheet timestamp as "Mar 5, 2025, 14:07". Unparseable values pass through.
pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(DISPLAY_FORMAT).to_string();
    }
    SHEET_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|parsed| parsed.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Check a wall post before it goes out
pub fn validate_post(name: &str, message: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if message.trim().is_empty() {
        return Err(ValidationError::MissingMessage);
    }
    let len = message.chars().count();
    if len > MAX_MESSAGE_LEN {
        return Err(ValidationError::MessageTooLong {
            len,
            max: MAX_MESSAGE_LEN,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageWallSnapshot {
    pub load: LoadState,
    /// Most recent first
    pub messages: Vec<WallMessage>,
    pub posting: bool,
}

#[derive(Clone)]
pub struct MessageWallView {
    api: Arc<dyn MessageWallApi>,
    state: Arc<Mutex<MessageWallSnapshot>>,
}

impl MessageWallView {
    pub fn new(api: Arc<dyn MessageWallApi>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(MessageWallSnapshot::default())),
        }
    }

    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.state.lock().load = LoadState::Loading;

        match self.api.fetch_messages().await {
            Ok(messages) => {
                let mut state = self.state.lock();
                state.messages = messages;
                state.load = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch messages");
                self.state.lock().load = LoadState::Failed(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Validate and post, then reload the wall
    pub async fn post(&self, name: &str, message: &str) -> Result<(), PostError> {
        validate_post(name, message)?;

        self.state.lock().posting = true;
        let result = self.api.post_message(name.trim(), message.trim()).await;
        self.state.lock().posting = false;

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to post message");
            return Err(e.into());
        }

        tracing::info!(name = %name.trim(), "Message posted");
        // A failed reload is already reflected in the load state
        let _ = self.refresh().await;
        Ok(())
    }

    pub fn snapshot(&self) -> MessageWallSnapshot {
        self.state.lock().clone()
    }
}
