//! Search box with the matching-guest dropdown

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::api::{GuestRecord, RsvpStatus};
use crate::directory::SearchOutcome;
use crate::util::truncate_display;

use super::theme::{ACCENT, MUTED, SELECTED_BG, SUCCESS};
use super::TextInputState;

/// Search input plus the selection cursor over the current matches
#[derive(Debug, Clone)]
pub struct GuestSearchState {
    pub input: TextInputState,
    /// Directory indices of the current matches
    matches: Vec<usize>,
    selected: usize,
    scroll_offset: usize,
    max_visible: usize,
}

impl Default for GuestSearchState {
    fn default() -> Self {
        Self::new(8)
    }
}

impl GuestSearchState {
    pub fn new(max_visible: usize) -> Self {
        Self {
            input: TextInputState::new(),
            matches: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            max_visible: max_visible.max(1),
        }
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.set_matches(Vec::new());
    }

    /// Replace the match list, keeping the cursor in range
    pub fn set_matches(&mut self, matches: Vec<usize>) {
        self.matches = matches;
        self.selected = self.selected.min(self.matches.len().saturating_sub(1));
        self.scroll_offset = self.scroll_offset.min(self.selected);
    }

    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// Directory index under the cursor
    pub fn selected_index(&self) -> Option<usize> {
        self.matches.get(self.selected).copied()
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.scroll_offset {
                self.scroll_offset = self.selected;
            }
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.matches.len() {
            self.selected += 1;
            if self.selected >= self.scroll_offset + self.max_visible {
                self.scroll_offset = self.selected + 1 - self.max_visible;
            }
        }
    }
}

fn status_span(record: &GuestRecord) -> Span<'static> {
    match record.status() {
        RsvpStatus::Attending => Span::styled(
            format!("attending ({})", record.party_size()),
            Style::default().fg(SUCCESS),
        ),
        RsvpStatus::Declined => Span::styled("declined", Style::default().fg(MUTED)),
        RsvpStatus::Pending => Span::styled("awaiting reply", Style::default().fg(ACCENT)),
    }
}

/// Renders the search box and whatever sits under it: matches, a no-match hint, or nothing
pub struct GuestSearch<'a> {
    state: &'a GuestSearchState,
    outcome: &'a SearchOutcome,
    guests: &'a [GuestRecord],
    loading: bool,
    focused: bool,
}

impl<'a> GuestSearch<'a> {
    pub fn new(
        state: &'a GuestSearchState,
        outcome: &'a SearchOutcome,
        guests: &'a [GuestRecord],
    ) -> Self {
        Self {
            state,
            outcome,
            guests,
            loading: false,
            focused: true,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let [input_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        let block = Block::default()
            .title(" Find your name ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if self.focused { ACCENT } else { MUTED }));
        let inner = block.inner(input_area);
        block.render(input_area, buf);
        self.state.input.render(
            inner,
            buf,
            Style::default().fg(Color::White),
            ("Type your name...", Style::default().fg(MUTED)),
            self.focused,
        );

        if self.loading {
            Paragraph::new("Loading guest list...")
                .style(Style::default().fg(MUTED))
                .render(list_area, buf);
            return;
        }

        match self.outcome {
            SearchOutcome::Hidden => {}
            SearchOutcome::Matches(_) => self.render_matches(list_area, buf),
            SearchOutcome::NoMatch { request_name } => {
                let text = vec![
                    Line::from(Span::styled(
                        format!("No guest named \"{request_name}\" on the list."),
                        Style::default().fg(Color::White),
                    )),
                    Line::from(vec![
                        Span::raw("Press "),
                        Span::styled("Enter", Style::default().fg(ACCENT)),
                        Span::raw(" to request an invitation."),
                    ]),
                ];
                Paragraph::new(text)
                    .wrap(Wrap { trim: true })
                    .render(list_area, buf);
            }
        }
    }

    fn render_matches(&self, area: Rect, buf: &mut Buffer) {
        let rows = self
            .state
            .matches
            .iter()
            .enumerate()
            .skip(self.state.scroll_offset)
            .take(self.state.max_visible.min(area.height as usize));

        for (row, (position, &index)) in rows.enumerate() {
            let Some(record) = self.guests.get(index) else {
                continue;
            };
            let selected = position == self.state.selected;
            let style = if selected {
                Style::default()
                    .bg(SELECTED_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let marker = if selected { "› " } else { "  " };
            let name_width = (area.width as usize).saturating_sub(22);
            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(ACCENT)),
                Span::raw(format!(
                    "{:<width$}",
                    truncate_display(&record.name, name_width),
                    width = name_width
                )),
                Span::raw(" "),
                status_span(record),
            ]);
            let row_area = Rect {
                y: area.y + row as u16,
                height: 1,
                ..area
            };
            Paragraph::new(line).style(style).render(row_area, buf);
        }
    }
}
