use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::theme::{ACCENT, TAB_BAR_BG};

/// Section tabs across the top of the screen
pub struct TabBar<'a> {
    tabs: Vec<&'a str>,
    active: usize,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: Vec<&'a str>, active: usize) -> Self {
        Self { tabs, active }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, tab) in self.tabs.iter().enumerate() {
            if i == self.active {
                spans.push(Span::styled(" ▶ ", Style::default().fg(ACCENT)));
                spans.push(Span::styled(
                    format!("[{}] {}", i + 1, tab),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::raw("   "));
                spans.push(Span::styled(
                    format!("[{}] {}", i + 1, tab),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::raw("  "));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(TAB_BAR_BG))
            .render(area, buf);
    }
}
