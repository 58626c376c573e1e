mod dialog;
mod entourage_panel;
mod guest_book_panel;
mod guest_search;
mod message_wall_panel;
mod request_dialog;
mod rsvp_dialog;
mod tab_bar;
mod text_input;
pub mod theme;

pub use dialog::{DialogFrame, InstructionBar, StatusLine};
pub use entourage_panel::EntouragePanel;
pub use guest_book_panel::GuestBookPanel;
pub use guest_search::{GuestSearch, GuestSearchState};
pub use message_wall_panel::{ComposeDialog, ComposeState, MessageWallPanel};
pub use request_dialog::{RequestDialog, RequestDialogState};
pub use rsvp_dialog::{RsvpDialog, RsvpDialogState, RsvpField};
pub use tab_bar::TabBar;
pub use text_input::TextInputState;
