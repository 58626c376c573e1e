use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::api::MAX_MESSAGE_LEN;
use crate::rsvp::NoticeSlot;
use crate::views::{format_timestamp, MessageWallSnapshot};

use super::dialog::{DialogFrame, InstructionBar, StatusLine};
use super::theme::{ACCENT, ERROR, MUTED};
use super::TextInputState;

/// Name and message being composed for the wall
#[derive(Debug, Clone)]
pub struct ComposeState {
    /// 0 = name, 1 = message
    pub focus: usize,
    pub name: TextInputState,
    pub message: TextInputState,
}

impl Default for ComposeState {
    fn default() -> Self {
        Self {
            focus: 0,
            name: TextInputState::new(),
            message: TextInputState::new().max_chars(MAX_MESSAGE_LEN),
        }
    }
}

impl ComposeState {
    pub fn toggle_focus(&mut self) {
        self.focus = 1 - self.focus;
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInputState {
        if self.focus == 0 {
            &mut self.name
        } else {
            &mut self.message
        }
    }

    pub fn can_send(&self) -> bool {
        !self.name.value().trim().is_empty() && !self.message.value().trim().is_empty()
    }
}

/// Wall of posted messages, newest first
pub struct MessageWallPanel<'a> {
    snapshot: &'a MessageWallSnapshot,
    scroll: u16,
}

impl<'a> MessageWallPanel<'a> {
    pub fn new(snapshot: &'a MessageWallSnapshot, scroll: u16) -> Self {
        Self { snapshot, scroll }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if self.snapshot.load.is_loading() && self.snapshot.messages.is_empty() {
            Paragraph::new("Loading messages...")
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
        if self.snapshot.messages.is_empty() {
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "No Messages Yet",
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Press c to leave the first one",
                    Style::default().fg(MUTED),
                )),
            ])
            .alignment(Alignment::Center)
            .render(area, buf);
            return;
        }

        let mut lines = Vec::new();
        for message in &self.snapshot.messages {
            lines.push(Line::from(vec![
                Span::styled(
                    message.name.as_str(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", format_timestamp(&message.timestamp)),
                    Style::default().fg(MUTED),
                ),
            ]));
            lines.push(Line::from(message.message.as_str()));
            lines.push(Line::default());
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}

/// Compose dialog with a live character counter
pub struct ComposeDialog<'a> {
    state: &'a ComposeState,
    notice: &'a NoticeSlot,
    posting: bool,
}

impl<'a> ComposeDialog<'a> {
    pub fn new(state: &'a ComposeState, notice: &'a NoticeSlot, posting: bool) -> Self {
        Self {
            state,
            notice,
            posting,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let inner = DialogFrame::new("Leave a Message", 60, 12).render(area, buf);
        let [name_label, name, message_label, message, _, status, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let label = |text: String, focused: bool| {
            let style = if focused {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };
            Paragraph::new(Span::styled(text, style))
        };

        label("Your Name *".to_string(), self.state.focus == 0).render(name_label, buf);
        self.state.name.render(
            name,
            buf,
            Style::default().fg(Color::White),
            ("Enter your name", Style::default().fg(MUTED)),
            self.state.focus == 0 && !self.posting,
        );

        let count = self.state.message.char_len();
        label(
            format!("Your Message *  {count}/{MAX_MESSAGE_LEN}"),
            self.state.focus == 1,
        )
        .render(message_label, buf);
        self.state.message.render(
            message,
            buf,
            Style::default().fg(Color::White),
            ("Share your wishes for the couple...", Style::default().fg(MUTED)),
            self.state.focus == 1 && !self.posting,
        );

        StatusLine::new(self.notice.current()).render(status, buf);
        let instructions = if self.posting {
            vec![("", "Sending...")]
        } else {
            vec![("Tab", "switch field"), ("Enter", "send"), ("Esc", "cancel")]
        };
        InstructionBar::new(instructions).render(hints, buf);
    }
}
