//! Shared UI color constants.

use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(187, 138, 61);
pub const NAVY: Color = Color::Rgb(48, 76, 126);
pub const MUTED: Color = Color::Rgb(120, 130, 145);
pub const ERROR: Color = Color::Rgb(220, 80, 80);
pub const SUCCESS: Color = Color::Rgb(90, 180, 110);

pub const SELECTED_BG: Color = Color::Rgb(40, 60, 80);
pub const TAB_BAR_BG: Color = Color::Rgb(20, 20, 20);
pub const FOOTER_BG: Color = Color::Rgb(25, 25, 25);
