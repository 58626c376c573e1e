//! TUI testing utilities using Ratatui's TestBackend
//!
//! Renders the whole app into an in-memory buffer so tests can look for text on screen.

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use vows::App;

/// Create a test terminal with custom dimensions
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).expect("Failed to create test terminal")
}

/// Draw one frame of the app at the given size and return the buffer
pub fn render_app(app: &App, width: u16, height: u16) -> Buffer {
    let mut terminal = create_test_terminal_sized(width, height);
    terminal
        .draw(|f| app.draw(f))
        .expect("Failed to draw app");
    terminal.backend().buffer().clone()
}

/// Buffer contents row by row, trailing spaces removed
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);

    for y in area.y..area.y + area.height {
        let mut line = String::new();
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// Check if the buffer contains a string anywhere on a single row
pub fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
    buffer_to_string(buffer).lines().any(|line| line.contains(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_buffer_contains_trims_rows() {
        let mut terminal = create_test_terminal_sized(20, 3);
        terminal
            .draw(|f| f.render_widget(Paragraph::new("RSVP\nGuest Book"), f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer_to_string(buffer), "RSVP\nGuest Book\n");
        assert!(buffer_contains(buffer, "Guest Book"));
        assert!(!buffer_contains(buffer, "RSVP Guest"));
    }
}
