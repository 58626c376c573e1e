//! In-memory API doubles for deterministic testing
//!
//! `MockGuestApi` implements [`GuestApi`] over a seeded guest list and captures every
//! write so tests can assert on what would have gone over the wire. Updates are applied
//! to the in-memory sheet the way the spreadsheet automation would (match on
//! `originalName`, first row wins).
//!
//! # Example
//! ```no_run
//! use vows::api::mock::MockGuestApi;
//! use vows::api::{GuestApi, GuestRecord};
//!
//! #[tokio::test]
//! async fn test_lookup() {
//!     let api = MockGuestApi::new().with_guests(vec![GuestRecord::new("Juan Dela Cruz")]);
//!     let guests = api.list_guests().await.unwrap();
//!     assert_eq!(guests.len(), 1);
//!     assert_eq!(api.list_guests_calls(), 1);
//! }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::client::{endpoints, GuestApi};
use crate::api::error::ApiError;
use crate::api::message_wall::MessageWallApi;
use crate::api::models::{
    EntourageMember, GuestRecord, GuestRequest, GuestUpdate, PrincipalSponsor, WallMessage,
};

/// Which endpoints should fail
#[derive(Debug, Clone, Copy, Default)]
pub struct MockFailures {
    pub list_guests: bool,
    pub update_guest: bool,
    pub create_request: bool,
    pub entourage: bool,
    pub sponsors: bool,
}

fn mock_error(endpoint: &str) -> ApiError {
    ApiError::Status {
        endpoint: endpoint.to_string(),
        status: 500,
        body: "mock failure".to_string(),
    }
}

/// Mock guest API for testing
#[derive(Clone, Default)]
pub struct MockGuestApi {
    guests: Arc<Mutex<Vec<GuestRecord>>>,
    entourage: Arc<Mutex<Vec<EntourageMember>>>,
    sponsors: Arc<Mutex<Vec<PrincipalSponsor>>>,
    failures: Arc<Mutex<MockFailures>>,
    /// Captured update payloads
    updates: Arc<Mutex<Vec<GuestUpdate>>>,
    /// Captured guest requests
    requests: Arc<Mutex<Vec<GuestRequest>>>,
    list_guests_calls: Arc<AtomicUsize>,
    list_entourage_calls: Arc<AtomicUsize>,
    list_sponsor_calls: Arc<AtomicUsize>,
}

impl MockGuestApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guests(self, guests: Vec<GuestRecord>) -> Self {
        *self.guests.lock() = guests;
        self
    }

    pub fn with_entourage(self, members: Vec<EntourageMember>) -> Self {
        *self.entourage.lock() = members;
        self
    }

    pub fn with_sponsors(self, sponsors: Vec<PrincipalSponsor>) -> Self {
        *self.sponsors.lock() = sponsors;
        self
    }

    pub fn with_failures(self, failures: MockFailures) -> Self {
        *self.failures.lock() = failures;
        self
    }

    /// Change failure behaviour after construction (e.g. for "try again" tests)
    pub fn set_failures(&self, failures: MockFailures) {
        *self.failures.lock() = failures;
    }

    /// Replace the sheet contents, as if edited out-of-band
    pub fn set_guests(&self, guests: Vec<GuestRecord>) {
        *self.guests.lock() = guests;
    }

    pub fn guests(&self) -> Vec<GuestRecord> {
        self.guests.lock().clone()
    }

    pub fn captured_updates(&self) -> Vec<GuestUpdate> {
        self.updates.lock().clone()
    }

    pub fn captured_requests(&self) -> Vec<GuestRequest> {
        self.requests.lock().clone()
    }

    pub fn list_guests_calls(&self) -> usize {
        self.list_guests_calls.load(Ordering::SeqCst)
    }

    pub fn list_entourage_calls(&self) -> usize {
        self.list_entourage_calls.load(Ordering::SeqCst)
    }

    pub fn list_sponsor_calls(&self) -> usize {
        self.list_sponsor_calls.load(Ordering::SeqCst)
    }

    /// Total number of write calls that reached the API
    pub fn write_calls(&self) -> usize {
        self.updates.lock().len() + self.requests.lock().len()
    }
}

#[async_trait]
impl GuestApi for MockGuestApi {
    async fn list_guests(&self) -> Result<Vec<GuestRecord>, ApiError> {
        self.list_guests_calls.fetch_add(1, Ordering::SeqCst);
        if self.failures.lock().list_guests {
            return Err(mock_error(endpoints::GUESTS));
        }
        Ok(self.guests.lock().clone())
    }

    async fn update_guest(&self, update: &GuestUpdate) -> Result<(), ApiError> {
        self.updates.lock().push(update.clone());
        if self.failures.lock().update_guest {
            return Err(mock_error(endpoints::GUESTS));
        }

        let mut guests = self.guests.lock();
        if let Some(record) = guests
            .iter_mut()
            .find(|g| g.name.eq_ignore_ascii_case(&update.original_name))
        {
            record.name = update.name.clone();
            record.email = update.email.clone();
            record.rsvp = update.rsvp.clone();
            record.guest = update.guest.clone();
            record.message = update.message.clone();
        }
        Ok(())
    }

    async fn create_guest_request(&self, request: &GuestRequest) -> Result<(), ApiError> {
        self.requests.lock().push(request.clone());
        if self.failures.lock().create_request {
            return Err(mock_error(endpoints::GUEST_REQUESTS));
        }
        Ok(())
    }

    async fn list_entourage(&self) -> Result<Vec<EntourageMember>, ApiError> {
        self.list_entourage_calls.fetch_add(1, Ordering::SeqCst);
        if self.failures.lock().entourage {
            return Err(mock_error(endpoints::ENTOURAGE));
        }
        Ok(self.entourage.lock().clone())
    }

    async fn list_principal_sponsors(&self) -> Result<Vec<PrincipalSponsor>, ApiError> {
        self.list_sponsor_calls.fetch_add(1, Ordering::SeqCst);
        if self.failures.lock().sponsors {
            return Err(mock_error(endpoints::PRINCIPAL_SPONSOR));
        }
        Ok(self.sponsors.lock().clone())
    }
}

/// Mock message wall: posts are appended and read back newest first
#[derive(Clone, Default)]
pub struct MockMessageWall {
    /// Stored oldest first, like the sheet
    messages: Arc<Mutex<Vec<WallMessage>>>,
    fail_fetch: Arc<Mutex<bool>>,
    fail_post: Arc<Mutex<bool>>,
    fetch_calls: Arc<AtomicUsize>,
}

impl MockMessageWall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_messages(self, messages: Vec<WallMessage>) -> Self {
        *self.messages.lock() = messages;
        self
    }

    pub fn failing_fetch(self) -> Self {
        *self.fail_fetch.lock() = true;
        self
    }

    pub fn failing_post(self) -> Self {
        *self.fail_post.lock() = true;
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageWallApi for MockMessageWall {
    async fn fetch_messages(&self) -> Result<Vec<WallMessage>, ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_fetch.lock() {
            return Err(mock_error("message-wall-script"));
        }
        Ok(self.messages.lock().iter().rev().cloned().collect())
    }

    async fn post_message(&self, name: &str, message: &str) -> Result<(), ApiError> {
        if *self.fail_post.lock() {
            return Err(ApiError::transport("message-wall-form", "connection refused"));
        }
        let index = self.messages.lock().len();
        self.messages.lock().push(WallMessage {
            timestamp: format!("mock-{index}"),
            name: name.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
