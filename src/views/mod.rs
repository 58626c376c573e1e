//! Read-mostly panels that keep themselves fresh from the API and the refresh bus

pub mod entourage;
pub mod guest_book;
pub mod message_wall;

pub use entourage::{
    build_roster, EntourageSnapshot, EntourageView, RosterBody, RosterEntry, RosterRow,
    RosterSection,
};
pub use guest_book::{GuestBookSnapshot, GuestBookView};
pub use message_wall::{format_timestamp, MessageWallSnapshot, MessageWallView};

/// Fetch status shared by every panel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    /// Fetch failed; the text is shown next to a "try again" hint
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
