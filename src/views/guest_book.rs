use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::api::{ApiError, GuestApi, GuestRecord};
use crate::refresh::{spawn_refresh_listener, RefreshBus, RefreshSignal};
use crate::util::pluralize;
use crate::views::LoadState;

pub const LOAD_FAILED: &str = "Failed to load guest list";

/// Point-in-time copy of the guest book for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestBookSnapshot {
    pub load: LoadState,
    /// Attending records in sheet order
    pub entries: Vec<GuestRecord>,
    pub total_guests: u32,
}

impl GuestBookSnapshot {
    pub fn from_guests(guests: &[GuestRecord]) -> Self {
        let entries: Vec<GuestRecord> = guests.iter().filter(|g| g.is_attending()).cloned().collect();
        let total_guests = entries
            .iter()
            .map(GuestRecord::party_size)
            .fold(0u32, u32::saturating_add);
        Self {
            load: LoadState::Loaded,
            entries,
            total_guests,
        }
    }

    /// "3 Guests Celebrating With Us"
    pub fn headline(&self) -> String {
        format!(
            "{} {} Celebrating With Us",
            self.total_guests,
            pluralize(self.total_guests as usize, "Guest", "Guests")
        )
    }

    /// "2 RSVP entries"
    pub fn entry_line(&self) -> String {
        format!(
            "{} {}",
            self.entries.len(),
            pluralize(self.entries.len(), "RSVP entry", "RSVP entries")
        )
    }
}

/// Attending guests and head count, re-fetched whenever an RSVP lands
#[derive(Clone)]
pub struct GuestBookView {
    api: Arc<dyn GuestApi>,
    state: Arc<Mutex<GuestBookSnapshot>>,
}

impl GuestBookView {
    pub fn new(api: Arc<dyn GuestApi>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(GuestBookSnapshot::default())),
        }
    }

    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.state.lock().load = LoadState::Loading;

        match self.api.list_guests().await {
            Ok(guests) => {
                let snapshot = GuestBookSnapshot::from_guests(&guests);
                tracing::debug!(
                    entries = snapshot.entries.len(),
                    total = snapshot.total_guests,
                    "Guest book refreshed"
                );
                *self.state.lock() = snapshot;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load guests");
                self.state.lock().load = LoadState::Failed(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> GuestBookSnapshot {
        self.state.lock().clone()
    }

    /// Re-fetch `delay` after every `rsvpUpdated` signal
    pub fn watch(&self, bus: &RefreshBus, delay: Duration) -> JoinHandle<()> {
        let view = self.clone();
        spawn_refresh_listener(bus, RefreshSignal::RsvpUpdated, delay, move || {
            let view = view.clone();
            async move {
                let _ = view.refresh().await;
            }
        })
    }
}
