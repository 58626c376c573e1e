pub mod api;
pub mod cli;
pub mod config;
pub mod directory;
pub mod refresh;
pub mod rsvp;
pub mod ui;
pub mod util;
pub mod views;

pub use api::{
    ApiError, GuestApi, GuestRecord, HttpGuestApi, HttpMessageWall, MessageWallApi, RsvpStatus,
};
pub use config::Config;
pub use directory::{GuestDirectory, SearchOutcome};
pub use refresh::{RefreshBus, RefreshSignal};
pub use rsvp::{RsvpFlow, RsvpForm};
pub use ui::App;
