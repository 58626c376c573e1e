use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::api::{GuestRecord, RsvpStatus};
use crate::rsvp::{NoticeSlot, RsvpChoice, RsvpForm, RsvpStage};

use super::dialog::{DialogFrame, InstructionBar, StatusLine};
use super::theme::{ACCENT, MUTED, SELECTED_BG, SUCCESS};
use super::TextInputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpField {
    Attending,
    Guests,
    Message,
    Email,
}

/// Editable copy of the RSVP form with field focus
#[derive(Debug, Clone)]
pub struct RsvpDialogState {
    pub focus: RsvpField,
    pub choice: Option<RsvpChoice>,
    pub guest: TextInputState,
    pub message: TextInputState,
    pub email: TextInputState,
}

impl RsvpDialogState {
    pub fn from_form(form: &RsvpForm) -> Self {
        Self {
            focus: RsvpField::Attending,
            choice: form.choice,
            guest: TextInputState::with_value(&form.guest),
            message: TextInputState::with_value(&form.message),
            email: TextInputState::with_value(&form.email),
        }
    }

    /// Copy edits back into the flow's form
    pub fn apply_to(&self, form: &mut RsvpForm) {
        form.choice = self.choice;
        form.guest = self.guest.value().to_string();
        form.message = self.message.value().to_string();
        form.email = self.email.value().to_string();
    }

    /// The party size field only exists while "Yes" is picked
    pub fn fields(&self) -> Vec<RsvpField> {
        let mut fields = vec![RsvpField::Attending];
        if self.choice == Some(RsvpChoice::Yes) {
            fields.push(RsvpField::Guests);
        }
        fields.extend([RsvpField::Message, RsvpField::Email]);
        fields
    }

    pub fn next_field(&mut self) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + 1) % fields.len()];
    }

    pub fn prev_field(&mut self) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + fields.len() - 1) % fields.len()];
    }

    pub fn set_choice(&mut self, choice: RsvpChoice) {
        self.choice = Some(choice);
    }

    pub fn toggle_choice(&mut self) {
        self.choice = Some(match self.choice {
            Some(choice) => choice.toggle(),
            None => RsvpChoice::Yes,
        });
    }

    /// Text input under focus, None on the attendance toggle
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInputState> {
        match self.focus {
            RsvpField::Attending => None,
            RsvpField::Guests => Some(&mut self.guest),
            RsvpField::Message => Some(&mut self.message),
            RsvpField::Email => Some(&mut self.email),
        }
    }
}

pub struct RsvpDialog<'a> {
    state: &'a RsvpDialogState,
    guest: &'a GuestRecord,
    stage: RsvpStage,
    notice: &'a NoticeSlot,
}

impl<'a> RsvpDialog<'a> {
    pub fn new(
        state: &'a RsvpDialogState,
        guest: &'a GuestRecord,
        stage: RsvpStage,
        notice: &'a NoticeSlot,
    ) -> Self {
        Self {
            state,
            guest,
            stage,
            notice,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let title = format!("RSVP · {}", self.guest.name);
        let inner = DialogFrame::new(&title, 64, 18).render(area, buf);

        let [body, status, hints] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        StatusLine::new(self.notice.current()).render(status, buf);

        match self.stage {
            RsvpStage::Responded => {
                self.render_thank_you(body, buf);
                InstructionBar::new(vec![("Esc", "close")]).render(hints, buf);
            }
            RsvpStage::Submitting => {
                self.render_form(body, buf);
                InstructionBar::new(vec![("", "Submitting...")]).render(hints, buf);
            }
            RsvpStage::Editing | RsvpStage::Searching => {
                self.render_form(body, buf);
                InstructionBar::new(vec![
                    ("Tab", "next field"),
                    ("←/→", "yes/no"),
                    ("Enter", "submit"),
                    ("Esc", "cancel"),
                ])
                .render(hints, buf);
            }
        }
    }

    fn label(&self, field: RsvpField, text: &'a str) -> Span<'a> {
        let style = if self.state.focus == field {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        Span::styled(text, style)
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let fields = self.state.fields();
        let constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
        let rows = Layout::vertical(constraints).split(area);

        for (field, row) in fields.iter().zip(rows.iter()) {
            let [label_area, input_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(*row);
            let focused = self.state.focus == *field;

            match field {
                RsvpField::Attending => {
                    Paragraph::new(self.label(*field, "Can you attend? *")).render(label_area, buf);
                    let option = |choice: RsvpChoice, text: &'static str| {
                        let picked = self.state.choice == Some(choice);
                        let mut style = Style::default().fg(if picked { Color::White } else { MUTED });
                        if picked {
                            style = style.bg(SELECTED_BG).add_modifier(Modifier::BOLD);
                        }
                        Span::styled(format!(" {text} "), style)
                    };
                    Paragraph::new(Line::from(vec![
                        option(RsvpChoice::Yes, "Yes!"),
                        Span::raw("   "),
                        option(RsvpChoice::No, "Sorry, can't make it"),
                    ]))
                    .render(input_area, buf);
                }
                RsvpField::Guests => {
                    Paragraph::new(self.label(*field, "Number of Guests *")).render(label_area, buf);
                    self.state.guest.render(
                        input_area,
                        buf,
                        Style::default().fg(Color::White),
                        ("How many guests?", Style::default().fg(MUTED)),
                        focused,
                    );
                }
                RsvpField::Message => {
                    Paragraph::new(self.label(*field, "Your Message")).render(label_area, buf);
                    self.state.message.render(
                        input_area,
                        buf,
                        Style::default().fg(Color::White),
                        ("Share your excitement...", Style::default().fg(MUTED)),
                        focused,
                    );
                }
                RsvpField::Email => {
                    Paragraph::new(self.label(*field, "Email")).render(label_area, buf);
                    self.state.email.render(
                        input_area,
                        buf,
                        Style::default().fg(Color::White),
                        ("your.email@example.com", Style::default().fg(MUTED)),
                        focused,
                    );
                }
            }
        }
    }

    fn render_thank_you(&self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Thank You for Responding!",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from("We've received your RSVP and look forward to celebrating with you!"),
            Line::default(),
        ];

        match self.guest.status() {
            RsvpStatus::Attending => {
                lines.push(Line::from(Span::styled(
                    "You're Attending!",
                    Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(format!(
                    "Number of guests: {}",
                    self.guest.party_size()
                )));
            }
            RsvpStatus::Declined => {
                lines.push(Line::from(Span::styled(
                    "Unable to Attend",
                    Style::default().fg(MUTED).add_modifier(Modifier::BOLD),
                )));
            }
            RsvpStatus::Pending => {}
        }

        let message = self.guest.message.trim();
        if !message.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("\"{message}\""),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
