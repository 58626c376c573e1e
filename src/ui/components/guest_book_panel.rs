use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::util::{initials, truncate_display};
use crate::views::GuestBookSnapshot;

use super::theme::{ACCENT, ERROR, MUTED, NAVY};

/// Attending guests with initials, party size and message
pub struct GuestBookPanel<'a> {
    snapshot: &'a GuestBookSnapshot,
    scroll: u16,
}

impl<'a> GuestBookPanel<'a> {
    pub fn new(snapshot: &'a GuestBookSnapshot, scroll: u16) -> Self {
        Self { snapshot, scroll }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let [header, body] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        let title = vec![
            Line::from(Span::styled(
                "Book of Guests",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.snapshot.headline(),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                self.snapshot.entry_line(),
                Style::default().fg(MUTED),
            )),
        ];
        Paragraph::new(title)
            .alignment(Alignment::Center)
            .render(header, buf);

        if self.snapshot.load.is_loading() && self.snapshot.entries.is_empty() {
            Paragraph::new("Loading guests...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(MUTED))
                .render(body, buf);
            return;
        }
        if let Some(error) = self.snapshot.load.error() {
            Paragraph::new(vec![
                Line::from(Span::styled(error, Style::default().fg(ERROR))),
                Line::from(Span::styled("Press r to try again", Style::default().fg(MUTED))),
            ])
            .alignment(Alignment::Center)
            .render(body, buf);
            return;
        }
        if self.snapshot.entries.is_empty() {
            Paragraph::new("No guests have RSVP'd yet")
                .alignment(Alignment::Center)
                .style(Style::default().fg(MUTED))
                .render(body, buf);
            return;
        }

        let width = body.width as usize;
        let mut lines = Vec::new();
        for entry in &self.snapshot.entries {
            let size = entry.party_size();
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:^4} ", initials(&entry.name)),
                    Style::default().bg(NAVY).fg(Color::White),
                ),
                Span::raw(" "),
                Span::styled(
                    truncate_display(&entry.name, width.saturating_sub(20)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} {}", size, if size == 1 { "guest" } else { "guests" }),
                    Style::default().fg(MUTED),
                ),
            ]));
            let message = entry.message.trim();
            if !message.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("        \"{message}\""),
                    Style::default().add_modifier(Modifier::ITALIC),
                )));
            }
            lines.push(Line::default());
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(body, buf);
    }
}
