use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::views::{EntourageSnapshot, RosterBody, RosterEntry};

use super::theme::{ACCENT, ERROR, MUTED};

fn name_span(entry: Option<&RosterEntry>) -> String {
    entry.map(|e| e.name.clone()).unwrap_or_default()
}

/// Grouped entourage roster, side-by-side where the roles pair up
pub struct EntouragePanel<'a> {
    snapshot: &'a EntourageSnapshot,
    scroll: u16,
}

impl<'a> EntouragePanel<'a> {
    pub fn new(snapshot: &'a EntourageSnapshot, scroll: u16) -> Self {
        Self { snapshot, scroll }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if self.snapshot.load.is_loading() && self.snapshot.members.is_empty() {
            Paragraph::new("Loading entourage...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(MUTED))
                .render(area, buf);
            return;
        }
        if let Some(error) = self.snapshot.load.error() {
            Paragraph::new(vec![
                Line::from(Span::styled(error, Style::default().fg(ERROR))),
                Line::from(Span::styled("Press r to try again", Style::default().fg(MUTED))),
            ])
            .alignment(Alignment::Center)
            .render(area, buf);
            return;
        }

        let roster = self.snapshot.roster();
        if roster.is_empty() {
            Paragraph::new("The entourage will be announced soon")
                .alignment(Alignment::Center)
                .style(Style::default().fg(MUTED))
                .render(area, buf);
            return;
        }

        let half = (area.width as usize / 2).saturating_sub(2);
        let heading = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
        let pair_line = |left: String, right: String, style: Style| {
            Line::from(vec![
                Span::styled(format!("{left:>half$}"), style),
                Span::raw("    "),
                Span::styled(format!("{right:<half$}"), style),
            ])
        };

        let mut lines = Vec::new();
        for (i, section) in roster.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(Span::styled("───", Style::default().fg(MUTED))));
            }
            match &section.column_titles {
                Some((left, right)) => {
                    lines.push(pair_line(left.clone(), right.clone(), heading));
                }
                None => lines.push(Line::from(Span::styled(section.title.as_str(), heading))),
            }

            match &section.body {
                RosterBody::Single(entries) => {
                    for entry in entries {
                        lines.push(Line::from(Span::styled(
                            entry.name.as_str(),
                            Style::default().fg(Color::White),
                        )));
                    }
                }
                RosterBody::Pairs(rows) => {
                    for row in rows {
                        lines.push(pair_line(
                            name_span(row.left.as_ref()),
                            name_span(row.right.as_ref()),
                            Style::default().fg(Color::White),
                        ));
                    }
                }
            }
            lines.push(Line::default());
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
