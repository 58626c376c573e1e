//! Single-line text input with a char-indexed cursor

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInputState {
    input: String,
    /// Cursor position in chars
    cursor: usize,
    /// Maximum length in chars; None is unbounded
    max_chars: Option<usize>,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        let mut state = Self::new();
        state.set(value);
        state
    }

    /// Refuse input beyond `max` chars
    pub fn max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    pub fn set(&mut self, value: &str) {
        self.input = match self.max_chars {
            Some(max) => value.chars().take(max).collect(),
            None => value.to_string(),
        };
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    pub fn value(&self) -> &str {
        &self.input
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    /// Insert at the cursor. Returns false when the length cap refused it.
    pub fn insert_char(&mut self, c: char) -> bool {
        if self.max_chars.is_some_and(|max| self.char_len() >= max) {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Backspace
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.input.remove(at);
        }
    }

    /// Delete
    pub fn delete_forward(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.input.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Ctrl+U
    pub fn delete_to_start(&mut self) {
        let at = self.byte_offset(self.cursor);
        self.input.drain(..at);
        self.cursor = 0;
    }

    /// Ctrl+W
    pub fn delete_word(&mut self) {
        let chars: Vec<char> = self.input.chars().collect();
        let end = self.cursor;
        let mut start = end;
        while start > 0 && chars[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && chars[start - 1] != ' ' {
            start -= 1;
        }
        let (from, to) = (self.byte_offset(start), self.byte_offset(end));
        self.input.drain(from..to);
        self.cursor = start;
    }

    /// Render the value (or placeholder when empty), with a block cursor when focused
    pub fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        style: Style,
        placeholder: (&str, Style),
        focused: bool,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Keep the cursor in view on narrow fields
        let width = area.width as usize;
        let skip = (self.cursor + 1).saturating_sub(width);
        let visible: String = self.input.chars().skip(skip).collect();

        if self.input.is_empty() {
            Paragraph::new(placeholder.0)
                .style(placeholder.1)
                .render(area, buf);
        } else {
            Paragraph::new(visible).style(style).render(area, buf);
        }

        if focused {
            let cursor_x = area.x + ((self.cursor - skip) as u16).min(area.width - 1);
            buf[(cursor_x, area.y)].set_style(Style::default().add_modifier(Modifier::REVERSED));
        }
    }
}

impl std::fmt::Display for TextInputState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInputState::with_value("José");
        input.delete_char();
        assert_eq!(input.value(), "Jos");
        input.insert_char('é');
        input.move_left();
        input.move_left();
        input.insert_char('-');
        assert_eq!(input.value(), "Jo-sé");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_max_chars() {
        let mut input = TextInputState::new().max_chars(3);
        for c in "abcd".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value(), "abc");
        input.set("wxyz");
        assert_eq!(input.value(), "wxy");
    }

    #[test]
    fn test_delete_word() {
        let mut input = TextInputState::with_value("Juan Dela Cruz");
        input.delete_word();
        assert_eq!(input.value(), "Juan Dela ");
        input.delete_word();
        assert_eq!(input.value(), "Juan ");
        input.delete_to_start();
        assert_eq!(input.value(), "");
    }
}
