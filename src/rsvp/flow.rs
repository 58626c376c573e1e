//! RSVP state machine: search → select → submit → responded → closed, plus the
//! "request to join" side flow for names missing from the directory.
//!
//! Time is passed in explicitly (`now: Instant`) so timers can be driven by the UI tick
//! and by tests alike.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::api::{ApiError, GuestApi, GuestRecord};
use crate::directory::{GuestDirectory, SearchOutcome};
use crate::refresh::{RefreshBus, RefreshSignal};
use crate::rsvp::form::{RsvpChoice, RsvpForm, ValidationError};
use crate::rsvp::notice::NoticeSlot;
use crate::rsvp::request::GuestRequestForm;

pub const LOAD_FAILED: &str = "Failed to load guest list";
pub const RSVP_THANKS: &str = "Thank you for your response!";
pub const RSVP_FAILED: &str = "Failed to submit RSVP. Please try again.";
pub const REQUEST_THANKS: &str = "Request submitted! We'll review and get back to you.";
pub const REQUEST_FAILED: &str = "Failed to submit request. Please try again.";

#[derive(Debug, Error)]
pub enum RsvpError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("API request failed: {0}")]
    Api(#[from] ApiError),

    #[error("A submission is already in progress")]
    Busy,
}

/// Timers that drive the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowTiming {
    /// How long error notices stay up
    pub notice_dismiss: Duration,
    /// Delay between a successful submit and the dialog closing
    pub modal_close: Duration,
}

impl Default for FlowTiming {
    fn default() -> Self {
        Self {
            notice_dismiss: Duration::from_secs(5),
            modal_close: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpStage {
    /// No guest selected; the search box is active
    Searching,
    /// Form open for the selected guest
    Editing,
    /// Update call in flight
    Submitting,
    /// Guest has an answer on file (just submitted or already present)
    Responded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    Editing,
    Submitting,
    Submitted,
}

/// Things that happened during [`RsvpFlow::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    NoticeDismissed,
    /// RSVP dialog auto-closed after a successful submit
    ModalClosed,
    /// Request dialog auto-closed after a successful submit
    RequestClosed,
}

pub struct RsvpFlow {
    api: Arc<dyn GuestApi>,
    bus: RefreshBus,
    timing: FlowTiming,
    directory: GuestDirectory,
    loading: bool,
    query: String,
    selected: Option<GuestRecord>,
    form: RsvpForm,
    stage: RsvpStage,
    notice: NoticeSlot,
    close_at: Option<Instant>,
    request: Option<GuestRequestForm>,
    request_stage: RequestStage,
    request_close_at: Option<Instant>,
}

impl RsvpFlow {
    pub fn new(api: Arc<dyn GuestApi>, bus: RefreshBus, timing: FlowTiming) -> Self {
        Self {
            api,
            bus,
            timing,
            directory: GuestDirectory::default(),
            loading: false,
            query: String::new(),
            selected: None,
            form: RsvpForm::default(),
            stage: RsvpStage::Searching,
            notice: NoticeSlot::new(timing.notice_dismiss),
            close_at: None,
            request: None,
            request_stage: RequestStage::Editing,
            request_close_at: None,
        }
    }

    /// Fetch the guest list into the local cache
    pub async fn load_directory(&mut self, now: Instant) -> Result<(), ApiError> {
        self.loading = true;
        let result = GuestDirectory::fetch(self.api.as_ref()).await;
        self.loading = false;

        match result {
            Ok(directory) => {
                self.directory = directory;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching guests");
                self.notice.error(LOAD_FAILED, now);
                Err(e)
            }
        }
    }

    pub fn directory(&self) -> &GuestDirectory {
        &self.directory
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // Search

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn outcome(&self) -> SearchOutcome {
        self.directory.outcome(&self.query)
    }

    pub fn matches(&self) -> Vec<&GuestRecord> {
        self.directory.search(&self.query)
    }

    /// Pick a directory entry and open its form.
    ///
    /// Guests with an answer on file land on the thank-you view instead of the form.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(record) = self.directory.get(index).cloned() else {
            return false;
        };

        self.query = record.name.clone();
        self.form = RsvpForm::from_record(&record);
        self.stage = if record.has_responded() {
            RsvpStage::Responded
        } else {
            RsvpStage::Editing
        };
        self.selected = Some(record);
        self.notice.clear();
        self.close_at = None;
        true
    }

    /// Select by exact name (case-insensitive)
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        let index = self
            .directory
            .guests()
            .iter()
            .position(|g| g.name.trim().to_lowercase() == needle);
        match index {
            Some(index) => self.select(index),
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&GuestRecord> {
        self.selected.as_ref()
    }

    pub fn stage(&self) -> RsvpStage {
        self.stage
    }

    pub fn is_modal_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn form(&self) -> &RsvpForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RsvpForm {
        &mut self.form
    }

    pub fn set_choice(&mut self, choice: RsvpChoice) {
        self.form.choice = Some(choice);
    }

    pub fn notice(&self) -> &NoticeSlot {
        &self.notice
    }

    /// Submit the open form.
    ///
    /// Validation failures never reach the network. On success the `rsvpUpdated`
    /// signal is published and the dialog is scheduled to close.
    pub async fn submit(&mut self, now: Instant) -> Result<(), RsvpError> {
        if self.stage == RsvpStage::Submitting {
            return Err(RsvpError::Busy);
        }
        let Some(selected) = self.selected.clone() else {
            self.notice
                .error(ValidationError::NoGuestSelected.to_string(), now);
            return Err(ValidationError::NoGuestSelected.into());
        };

        let update = match self.form.to_update(&selected.name) {
            Ok(update) => update,
            Err(e) => {
                self.notice.error(e.to_string(), now);
                return Err(e.into());
            }
        };

        self.stage = RsvpStage::Submitting;
        self.notice.clear();

        if let Err(e) = self.api.update_guest(&update).await {
            tracing::warn!(error = %e, guest = %selected.name, "Error submitting RSVP");
            self.stage = RsvpStage::Editing;
            self.notice.error(RSVP_FAILED, now);
            return Err(e.into());
        }

        tracing::info!(guest = %selected.name, rsvp = %update.rsvp, "RSVP submitted");

        self.selected = Some(GuestRecord {
            name: update.name.clone(),
            email: update.email.clone(),
            rsvp: update.rsvp.clone(),
            guest: update.guest.clone(),
            message: update.message.clone(),
        });
        self.stage = RsvpStage::Responded;
        self.notice.success(RSVP_THANKS);
        self.bus.publish(RefreshSignal::RsvpUpdated);
        self.close_at = Some(now + self.timing.modal_close);
        Ok(())
    }

    /// Close the RSVP dialog and reset the search
    pub fn close(&mut self) {
        self.selected = None;
        self.query.clear();
        self.form = RsvpForm::default();
        self.stage = RsvpStage::Searching;
        self.notice.clear();
        self.close_at = None;
    }

    // Guest request

    /// Open the request form seeded with the current query
    pub fn open_request(&mut self) {
        let seed = self.query.clone();
        self.open_request_with(&seed);
    }

    pub fn open_request_with(&mut self, name: &str) {
        self.request = Some(GuestRequestForm::seeded(name));
        self.request_stage = RequestStage::Editing;
        self.request_close_at = None;
        self.notice.clear();
    }

    pub fn request(&self) -> Option<&GuestRequestForm> {
        self.request.as_ref()
    }

    pub fn request_mut(&mut self) -> Option<&mut GuestRequestForm> {
        self.request.as_mut()
    }

    pub fn request_stage(&self) -> Option<RequestStage> {
        self.request.as_ref().map(|_| self.request_stage)
    }

    pub async fn submit_request(&mut self, now: Instant) -> Result<(), RsvpError> {
        let Some(form) = self.request.clone() else {
            return Err(ValidationError::MissingName.into());
        };
        if self.request_stage != RequestStage::Editing {
            return Err(RsvpError::Busy);
        }

        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => {
                self.notice.error(e.to_string(), now);
                return Err(e.into());
            }
        };

        self.request_stage = RequestStage::Submitting;
        self.notice.clear();

        if let Err(e) = self.api.create_guest_request(&request).await {
            tracing::warn!(error = %e, name = %request.name, "Error submitting guest request");
            self.request_stage = RequestStage::Editing;
            self.notice.error(REQUEST_FAILED, now);
            return Err(e.into());
        }

        tracing::info!(name = %request.name, guests = %request.guest, "Guest request submitted");
        self.request_stage = RequestStage::Submitted;
        self.notice.success(REQUEST_THANKS);
        self.request_close_at = Some(now + self.timing.modal_close);
        Ok(())
    }

    pub fn close_request(&mut self) {
        self.request = None;
        self.request_stage = RequestStage::Editing;
        self.request_close_at = None;
        self.notice.clear();
    }

    /// Advance timers. Returns what fired, in order.
    pub fn tick(&mut self, now: Instant) -> Vec<FlowEvent> {
        let mut events = Vec::new();

        if self.notice.tick(now) {
            events.push(FlowEvent::NoticeDismissed);
        }

        if self.close_at.is_some_and(|at| now >= at) {
            self.close();
            events.push(FlowEvent::ModalClosed);
        }

        if self.request_close_at.is_some_and(|at| now >= at) {
            self.close_request();
            self.query.clear();
            events.push(FlowEvent::RequestClosed);
        }

        events
    }

    /// Advance timers and re-fetch the directory when the RSVP dialog auto-closes
    pub async fn poll(&mut self, now: Instant) -> Vec<FlowEvent> {
        let events = self.tick(now);
        if events.contains(&FlowEvent::ModalClosed) {
            // Failure is already surfaced as a notice
            let _ = self.load_directory(now).await;
        }
        events
    }
}
