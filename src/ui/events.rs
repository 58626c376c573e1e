/// Top-level sections of the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Rsvp,
    GuestBook,
    Entourage,
    Messages,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Rsvp => "RSVP",
            Tab::GuestBook => "Guest Book",
            Tab::Entourage => "Entourage",
            Tab::Messages => "Messages",
        }
    }
}

/// Which widget currently receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typing into the guest search box
    Search,
    RsvpForm,
    RequestForm,
    ComposeMessage,
    /// Scrolling a read-only panel
    Browse,
}
