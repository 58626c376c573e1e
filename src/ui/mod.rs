pub mod app;
pub mod components;
pub mod effect;
pub mod events;
pub mod terminal_guard;

pub use app::App;
pub use effect::Effect;
pub use events::{InputMode, Tab};
pub use terminal_guard::{install_panic_hook, TerminalGuard};
