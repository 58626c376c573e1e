use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget},
};

use crate::rsvp::{GuestRequestForm, NoticeSlot, RequestStage};

use super::dialog::{DialogFrame, InstructionBar, StatusLine};
use super::theme::{ACCENT, MUTED};
use super::TextInputState;

const FIELDS: [(&str, &str); 5] = [
    ("Full Name *", "Enter your full name"),
    ("Email", "your.email@example.com"),
    ("Phone", "+1 (555) 123-4567"),
    ("Number of Guests *", "How many guests?"),
    ("Message", "Tell the couple how you know them"),
];

/// Editable copy of the join request with field focus
#[derive(Debug, Clone)]
pub struct RequestDialogState {
    pub focus: usize,
    inputs: [TextInputState; 5],
}

impl RequestDialogState {
    pub fn from_form(form: &GuestRequestForm) -> Self {
        Self {
            focus: 0,
            inputs: [
                TextInputState::with_value(&form.name),
                TextInputState::with_value(&form.email),
                TextInputState::with_value(&form.phone),
                TextInputState::with_value(&form.guest),
                TextInputState::with_value(&form.message),
            ],
        }
    }

    pub fn apply_to(&self, form: &mut GuestRequestForm) {
        let [name, email, phone, guest, message] = &self.inputs;
        form.name = name.value().to_string();
        form.email = email.value().to_string();
        form.phone = phone.value().to_string();
        form.guest = guest.value().to_string();
        form.message = message.value().to_string();
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % FIELDS.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + FIELDS.len() - 1) % FIELDS.len();
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInputState {
        &mut self.inputs[self.focus]
    }
}

pub struct RequestDialog<'a> {
    state: &'a RequestDialogState,
    stage: RequestStage,
    notice: &'a NoticeSlot,
}

impl<'a> RequestDialog<'a> {
    pub fn new(state: &'a RequestDialogState, stage: RequestStage, notice: &'a NoticeSlot) -> Self {
        Self {
            state,
            stage,
            notice,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let inner = DialogFrame::new("Request an Invitation", 60, 20).render(area, buf);

        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(FIELDS.iter().map(|_| Constraint::Length(3)));
        constraints.extend([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)]);
        let rows = Layout::vertical(constraints).split(inner);

        Paragraph::new("Not on the list yet? Send your details and the couple will review.")
            .style(Style::default().fg(MUTED))
            .render(rows[0], buf);

        for (i, (label, placeholder)) in FIELDS.iter().enumerate() {
            let [label_area, input_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(rows[i + 1]);
            let focused = self.state.focus == i && self.stage == RequestStage::Editing;
            let label_style = if focused {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };
            Paragraph::new(Span::styled(*label, label_style)).render(label_area, buf);
            self.state.inputs[i].render(
                input_area,
                buf,
                Style::default().fg(Color::White),
                (*placeholder, Style::default().fg(MUTED)),
                focused,
            );
        }

        let status = rows[rows.len() - 2];
        let hints = rows[rows.len() - 1];
        StatusLine::new(self.notice.current()).render(status, buf);

        let instructions = match self.stage {
            RequestStage::Editing => vec![("Tab", "next field"), ("Enter", "send"), ("Esc", "cancel")],
            RequestStage::Submitting => vec![("", "Sending...")],
            RequestStage::Submitted => vec![("Esc", "close")],
        };
        InstructionBar::new(instructions).render(hints, buf);
    }
}
