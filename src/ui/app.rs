use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::task::JoinHandle;

use crate::api::{GuestApi, MessageWallApi};
use crate::config::Config;
use crate::directory::SearchOutcome;
use crate::refresh::RefreshBus;
use crate::rsvp::{FlowEvent, NoticeSlot, RequestStage, RsvpChoice, RsvpFlow, RsvpStage};
use crate::ui::components::{
    theme::{ACCENT, FOOTER_BG, MUTED},
    ComposeDialog, ComposeState, EntouragePanel, GuestBookPanel, GuestSearch, GuestSearchState,
    InstructionBar, MessageWallPanel, RequestDialog, RequestDialogState, RsvpDialog,
    RsvpDialogState, RsvpField, StatusLine, TabBar, TextInputState,
};
use crate::ui::effect::Effect;
use crate::ui::events::{InputMode, Tab};
use crate::ui::terminal_guard::TerminalGuard;
use crate::views::message_wall::{PostError, POST_FAILED, POST_SENT};
use crate::views::{EntourageView, GuestBookView, MessageWallView};

const TICK: Duration = Duration::from_millis(100);

/// Main application state
pub struct App {
    config: Config,
    bus: RefreshBus,
    flow: RsvpFlow,
    guest_book: GuestBookView,
    entourage: Option<EntourageView>,
    wall: Option<MessageWallView>,
    tab: Tab,
    search: GuestSearchState,
    rsvp_dialog: Option<RsvpDialogState>,
    request_dialog: Option<RequestDialogState>,
    compose: Option<ComposeState>,
    wall_notice: NoticeSlot,
    /// Scroll offset of the read-only panels
    scroll: u16,
    should_quit: bool,
    watchers: Vec<JoinHandle<()>>,
}

impl App {
    pub fn new(
        config: Config,
        api: Arc<dyn GuestApi>,
        wall_api: Option<Arc<dyn MessageWallApi>>,
    ) -> Self {
        let bus = RefreshBus::new();
        let flow = RsvpFlow::new(api.clone(), bus.clone(), config.flow_timing());
        let entourage = config
            .display
            .show_entourage
            .then(|| EntourageView::new(api.clone()));
        let wall = wall_api
            .filter(|_| config.display.show_message_wall)
            .map(MessageWallView::new);
        let wall_notice = NoticeSlot::new(config.flow_timing().notice_dismiss);

        Self {
            guest_book: GuestBookView::new(api),
            config,
            bus,
            flow,
            entourage,
            wall,
            tab: Tab::Rsvp,
            search: GuestSearchState::default(),
            rsvp_dialog: None,
            request_dialog: None,
            compose: None,
            wall_notice,
            scroll: 0,
            should_quit: false,
            watchers: Vec::new(),
        }
    }

    pub fn flow(&self) -> &RsvpFlow {
        &self.flow
    }

    pub fn bus(&self) -> &RefreshBus {
        &self.bus
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn tabs(&self) -> Vec<Tab> {
        let mut tabs = vec![Tab::Rsvp, Tab::GuestBook];
        if self.entourage.is_some() {
            tabs.push(Tab::Entourage);
        }
        if self.wall.is_some() {
            tabs.push(Tab::Messages);
        }
        tabs
    }

    pub fn input_mode(&self) -> InputMode {
        if self.compose.is_some() {
            InputMode::ComposeMessage
        } else if self.request_dialog.is_some() {
            InputMode::RequestForm
        } else if self.rsvp_dialog.is_some() {
            InputMode::RsvpForm
        } else if self.tab == Tab::Rsvp {
            InputMode::Search
        } else {
            InputMode::Browse
        }
    }

    /// Subscribe the panels to the refresh bus
    pub fn start_watchers(&mut self) {
        self.watchers
            .push(self.guest_book.watch(&self.bus, self.config.rsvp_refresh_delay()));
        if let Some(entourage) = &self.entourage {
            self.watchers
                .push(entourage.watch(&self.bus, self.config.entourage_refresh_delay()));
        }
    }

    /// Initial fetch of everything on screen
    pub async fn load_all(&mut self) {
        let now = Instant::now();
        let entourage = self.entourage.clone();
        let wall = self.wall.clone();
        let _ = tokio::join!(
            self.flow.load_directory(now),
            self.guest_book.refresh(),
            async {
                if let Some(view) = &entourage {
                    let _ = view.refresh().await;
                }
            },
            async {
                if let Some(view) = &wall {
                    let _ = view.refresh().await;
                }
            },
        );
        for name in self.flow.directory().duplicate_names() {
            tracing::warn!(name = %name, "Guest list has duplicate names; updates hit the first match");
        }
        self.sync_search();
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        self.start_watchers();
        terminal.draw(|f| self.draw(f))?;
        self.load_all().await;

        let result = self.event_loop(&mut terminal).await;

        for watcher in self.watchers.drain(..) {
            watcher.abort();
        }
        guard.cleanup()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK);

        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            let effect = tokio::select! {
                _ = ticker.tick() => {
                    self.tick(Instant::now()).await;
                    None
                }
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key)
                    }
                    Some(Ok(Event::Paste(text))) => {
                        self.handle_paste(&text);
                        None
                    }
                    Some(Ok(_)) => None,
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            };

            if let Some(effect) = effect {
                terminal.draw(|f| self.draw(f))?;
                self.run_effect(effect).await;
            }
        }

        Ok(())
    }

    /// Advance timers; closes dialogs whose success delay has elapsed
    pub async fn tick(&mut self, now: Instant) {
        for event in self.flow.poll(now).await {
            match event {
                FlowEvent::ModalClosed => {
                    self.rsvp_dialog = None;
                    self.sync_search();
                }
                FlowEvent::RequestClosed => {
                    self.request_dialog = None;
                    self.sync_search();
                }
                FlowEvent::NoticeDismissed => {}
            }
        }
        self.wall_notice.tick(now);
    }

    /// Keep the search box and match list in step with the flow
    fn sync_search(&mut self) {
        if self.search.input.value() != self.flow.query() {
            self.search.input.set(self.flow.query());
        }
        let matches = self.flow.directory().search_indices(self.flow.query());
        self.search.set_matches(matches);
    }

    fn focused_input(&mut self) -> Option<&mut TextInputState> {
        match self.input_mode() {
            InputMode::ComposeMessage => self.compose.as_mut().map(|c| c.focused_input_mut()),
            InputMode::RequestForm => self
                .request_dialog
                .as_mut()
                .map(|d| d.focused_input_mut()),
            InputMode::RsvpForm => self
                .rsvp_dialog
                .as_mut()
                .and_then(|d| d.focused_input_mut()),
            InputMode::Search => Some(&mut self.search.input),
            InputMode::Browse => None,
        }
    }

    fn after_input_edit(&mut self) {
        if self.input_mode() == InputMode::Search {
            let query = self.search.input.value().to_string();
            self.flow.set_query(query);
            self.sync_search();
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Some(input) = self.focused_input() {
            for c in text.chars().filter(|c| !c.is_control()) {
                input.insert_char(c);
            }
            self.after_input_edit();
        }
    }

    /// Apply a key press. Anything needing the network comes back as an [`Effect`].
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return None;
        }

        match self.input_mode() {
            InputMode::ComposeMessage => self.handle_compose_key(key),
            InputMode::RequestForm => self.handle_request_key(key),
            InputMode::RsvpForm => self.handle_rsvp_key(key),
            InputMode::Search => self.handle_search_key(key),
            InputMode::Browse => self.handle_browse_key(key),
        }
    }

    /// Shared single-line editing keys. Returns true when the key was consumed.
    fn edit_focused(&mut self, key: KeyEvent) -> bool {
        let Some(input) = self.focused_input() else {
            return false;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => input.delete_to_start(),
            KeyCode::Char('w') if ctrl => input.delete_word(),
            KeyCode::Char('a') if ctrl => input.move_start(),
            KeyCode::Char('e') if ctrl => input.move_end(),
            KeyCode::Char(c) if !ctrl => {
                input.insert_char(c);
            }
            KeyCode::Backspace => input.delete_char(),
            KeyCode::Delete => input.delete_forward(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_start(),
            KeyCode::End => input.move_end(),
            _ => return false,
        }
        self.after_input_edit();
        true
    }

    fn switch_tab(&mut self, forward: bool) {
        let tabs = self.tabs();
        let pos = tabs.iter().position(|t| *t == self.tab).unwrap_or(0);
        let next = if forward {
            (pos + 1) % tabs.len()
        } else {
            (pos + tabs.len() - 1) % tabs.len()
        };
        self.tab = tabs[next];
        self.scroll = 0;
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Tab => self.switch_tab(true),
            KeyCode::BackTab => self.switch_tab(false),
            KeyCode::Up => self.search.select_prev(),
            KeyCode::Down => self.search.select_next(),
            KeyCode::F(5) => return Some(Effect::ReloadDirectory),
            KeyCode::Esc => {
                self.flow.set_query("");
                self.sync_search();
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.open_request();
            }
            KeyCode::Enter => match self.flow.outcome() {
                SearchOutcome::Matches(_) => {
                    if let Some(index) = self.search.selected_index() {
                        self.open_rsvp(index);
                    }
                }
                SearchOutcome::NoMatch { .. } => self.open_request(),
                SearchOutcome::Hidden => {}
            },
            _ => {
                self.edit_focused(key);
            }
        }
        None
    }

    fn open_rsvp(&mut self, index: usize) {
        if self.flow.select(index) {
            self.rsvp_dialog = Some(RsvpDialogState::from_form(self.flow.form()));
            self.sync_search();
        }
    }

    fn open_request(&mut self) {
        self.flow.open_request();
        self.request_dialog = self.flow.request().map(RequestDialogState::from_form);
    }

    fn close_rsvp(&mut self) -> Option<Effect> {
        let responded = self.flow.stage() == RsvpStage::Responded;
        self.flow.close();
        self.rsvp_dialog = None;
        self.sync_search();
        responded.then_some(Effect::ReloadDirectory)
    }

    fn handle_rsvp_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match self.flow.stage() {
            RsvpStage::Submitting => return None,
            RsvpStage::Responded => {
                return match key.code {
                    KeyCode::Esc | KeyCode::Enter => self.close_rsvp(),
                    _ => None,
                };
            }
            RsvpStage::Editing | RsvpStage::Searching => {}
        }

        let dialog = self.rsvp_dialog.as_mut()?;
        match key.code {
            KeyCode::Esc => return self.close_rsvp(),
            KeyCode::Enter => {
                dialog.apply_to(self.flow.form_mut());
                return Some(Effect::SubmitRsvp);
            }
            KeyCode::Tab | KeyCode::Down => dialog.next_field(),
            KeyCode::BackTab | KeyCode::Up => dialog.prev_field(),
            _ if dialog.focus == RsvpField::Attending => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => dialog.toggle_choice(),
                KeyCode::Char('y') | KeyCode::Char('Y') => dialog.set_choice(RsvpChoice::Yes),
                KeyCode::Char('n') | KeyCode::Char('N') => dialog.set_choice(RsvpChoice::No),
                _ => {}
            },
            _ => {
                self.edit_focused(key);
            }
        }
        None
    }

    fn handle_request_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match self.flow.request_stage() {
            Some(RequestStage::Submitting) => return None,
            Some(RequestStage::Submitted) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    self.flow.close_request();
                    self.request_dialog = None;
                    self.flow.set_query("");
                    self.sync_search();
                }
                return None;
            }
            Some(RequestStage::Editing) | None => {}
        }

        let dialog = self.request_dialog.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.flow.close_request();
                self.request_dialog = None;
            }
            KeyCode::Enter => {
                if let Some(form) = self.flow.request_mut() {
                    dialog.apply_to(form);
                }
                return Some(Effect::SubmitRequest);
            }
            KeyCode::Tab | KeyCode::Down => dialog.next_field(),
            KeyCode::BackTab | KeyCode::Up => dialog.prev_field(),
            _ => {
                self.edit_focused(key);
            }
        }
        None
    }

    fn handle_compose_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let posting = self.wall.as_ref().is_some_and(|w| w.snapshot().posting);
        if posting {
            return None;
        }
        let compose = self.compose.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.compose = None;
                self.wall_notice.clear();
            }
            KeyCode::Tab | KeyCode::BackTab => compose.toggle_focus(),
            KeyCode::Enter => {
                return Some(Effect::PostMessage {
                    name: compose.name.value().to_string(),
                    message: compose.message.value().to_string(),
                });
            }
            _ => {
                self.edit_focused(key);
            }
        }
        None
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Tab => self.switch_tab(true),
            KeyCode::BackTab => self.switch_tab(false),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => {
                return match self.tab {
                    Tab::GuestBook => Some(Effect::RefreshGuestBook),
                    Tab::Entourage => Some(Effect::RefreshEntourage),
                    Tab::Messages => Some(Effect::RefreshMessages),
                    Tab::Rsvp => None,
                };
            }
            KeyCode::Char('c') if self.tab == Tab::Messages => {
                self.compose = Some(ComposeState::default());
                self.wall_notice.clear();
            }
            _ => {}
        }
        None
    }

    pub async fn run_effect(&mut self, effect: Effect) {
        let now = Instant::now();
        match effect {
            Effect::SubmitRsvp => {
                if let Err(e) = self.flow.submit(now).await {
                    tracing::debug!(error = %e, "RSVP not submitted");
                }
            }
            Effect::SubmitRequest => {
                if let Err(e) = self.flow.submit_request(now).await {
                    tracing::debug!(error = %e, "Guest request not submitted");
                }
            }
            Effect::PostMessage { name, message } => {
                let Some(wall) = self.wall.clone() else {
                    return;
                };
                match wall.post(&name, &message).await {
                    Ok(()) => {
                        self.compose = None;
                        self.wall_notice.success(POST_SENT);
                    }
                    Err(PostError::Validation(e)) => self.wall_notice.error(e.to_string(), now),
                    Err(PostError::Api(_)) => self.wall_notice.error(POST_FAILED, now),
                }
            }
            Effect::ReloadDirectory => {
                let _ = self.flow.load_directory(now).await;
                self.sync_search();
            }
            Effect::RefreshGuestBook => {
                let _ = self.guest_book.refresh().await;
            }
            Effect::RefreshEntourage => {
                if let Some(view) = &self.entourage {
                    let _ = view.refresh().await;
                }
            }
            Effect::RefreshMessages => {
                if let Some(view) = &self.wall {
                    let _ = view.refresh().await;
                }
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let [tab_area, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let tabs = self.tabs();
        let active = tabs.iter().position(|t| *t == self.tab).unwrap_or(0);
        TabBar::new(tabs.iter().map(Tab::title).collect(), active)
            .render(tab_area, frame.buffer_mut());

        match self.tab {
            Tab::Rsvp => self.draw_rsvp(body, frame),
            Tab::GuestBook => {
                let snapshot = self.guest_book.snapshot();
                GuestBookPanel::new(&snapshot, self.scroll).render(body, frame.buffer_mut());
            }
            Tab::Entourage => {
                if let Some(view) = &self.entourage {
                    let snapshot = view.snapshot();
                    EntouragePanel::new(&snapshot, self.scroll).render(body, frame.buffer_mut());
                }
            }
            Tab::Messages => self.draw_messages(body, frame),
        }

        self.draw_footer(footer, frame);
    }

    fn draw_rsvp(&self, area: Rect, frame: &mut Frame) {
        let [intro, search, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "RSVP",
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Search for your name to respond to the invitation",
                    Style::default().fg(MUTED),
                )),
            ])
            .alignment(Alignment::Center),
            intro,
        );

        let outcome = self.flow.outcome();
        let dialog_open = self.rsvp_dialog.is_some() || self.request_dialog.is_some();
        GuestSearch::new(&self.search, &outcome, self.flow.directory().guests())
            .loading(self.flow.is_loading())
            .focused(!dialog_open)
            .render(search, frame.buffer_mut());

        if !dialog_open {
            StatusLine::new(self.flow.notice().current()).render(status, frame.buffer_mut());
        }

        if let (Some(dialog), Some(guest)) = (&self.rsvp_dialog, self.flow.selected()) {
            RsvpDialog::new(dialog, guest, self.flow.stage(), self.flow.notice())
                .render(area, frame.buffer_mut());
        }
        if let (Some(dialog), Some(stage)) = (&self.request_dialog, self.flow.request_stage()) {
            RequestDialog::new(dialog, stage, self.flow.notice()).render(area, frame.buffer_mut());
        }
    }

    fn draw_messages(&self, area: Rect, frame: &mut Frame) {
        let Some(view) = &self.wall else {
            return;
        };
        let snapshot = view.snapshot();
        let [body, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        MessageWallPanel::new(&snapshot, self.scroll).render(body, frame.buffer_mut());

        match &self.compose {
            Some(compose) => ComposeDialog::new(compose, &self.wall_notice, snapshot.posting)
                .render(area, frame.buffer_mut()),
            None => StatusLine::new(self.wall_notice.current()).render(status, frame.buffer_mut()),
        }
    }

    fn draw_footer(&self, area: Rect, frame: &mut Frame) {
        let hints = match self.input_mode() {
            InputMode::Search => vec![
                ("↑/↓", "select"),
                ("Enter", "open"),
                ("^R", "request invite"),
                ("Tab", "next section"),
                ("^C", "quit"),
            ],
            InputMode::Browse if self.tab == Tab::Messages => vec![
                ("c", "compose"),
                ("r", "reload"),
                ("j/k", "scroll"),
                ("Tab", "next section"),
                ("q", "quit"),
            ],
            InputMode::Browse => vec![
                ("r", "reload"),
                ("j/k", "scroll"),
                ("Tab", "next section"),
                ("q", "quit"),
            ],
            InputMode::RsvpForm | InputMode::RequestForm | InputMode::ComposeMessage => {
                vec![("^C", "quit")]
            }
        };
        frame.render_widget(Paragraph::new("").style(Style::default().bg(FOOTER_BG)), area);
        InstructionBar::new(hints).render(area, frame.buffer_mut());
    }
}
