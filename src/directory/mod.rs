//! Client-side guest directory cache and name search.
//!
//! The directory is a plain snapshot of `GET /api/guests`. Search never touches the
//! network; refreshing the snapshot is the caller's job.

use crate::api::{ApiError, GuestApi, GuestRecord, RsvpStatus};

/// Result of typing into the guest search box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query: dropdown hidden
    Hidden,
    /// Indices into the directory, in list order
    Matches(Vec<usize>),
    /// Nothing matched; offer a join request seeded with the typed text
    NoMatch { request_name: String },
}

impl SearchOutcome {
    pub fn is_hidden(&self) -> bool {
        matches!(self, SearchOutcome::Hidden)
    }

    pub fn match_count(&self) -> usize {
        match self {
            SearchOutcome::Matches(indices) => indices.len(),
            _ => 0,
        }
    }
}

/// Attendance totals over the directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RsvpSummary {
    /// Records answering "Yes"
    pub attending_entries: usize,
    pub declined_entries: usize,
    pub pending_entries: usize,
    /// Sum of party sizes over attending records
    pub total_guests: u32,
}

#[derive(Debug, Clone, Default)]
pub struct GuestDirectory {
    guests: Vec<GuestRecord>,
}

impl GuestDirectory {
    pub fn new(guests: Vec<GuestRecord>) -> Self {
        Self { guests }
    }

    /// Fetch a fresh snapshot from the API
    pub async fn fetch(api: &dyn GuestApi) -> Result<Self, ApiError> {
        let guests = api.list_guests().await?;
        tracing::debug!(count = guests.len(), "Loaded guest directory");
        Ok(Self::new(guests))
    }

    pub fn replace(&mut self, guests: Vec<GuestRecord>) {
        self.guests = guests;
    }

    pub fn guests(&self) -> &[GuestRecord] {
        &self.guests
    }

    pub fn get(&self, index: usize) -> Option<&GuestRecord> {
        self.guests.get(index)
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    /// Indices of guests whose name contains `query`, ignoring case.
    ///
    /// A blank query matches nothing.
    pub fn search_indices(&self, query: &str) -> Vec<usize> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.guests
            .iter()
            .enumerate()
            .filter(|(_, g)| g.name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn search(&self, query: &str) -> Vec<&GuestRecord> {
        self.search_indices(query)
            .into_iter()
            .filter_map(|i| self.guests.get(i))
            .collect()
    }

    pub fn outcome(&self, query: &str) -> SearchOutcome {
        if query.trim().is_empty() {
            return SearchOutcome::Hidden;
        }
        let matches = self.search_indices(query);
        if matches.is_empty() {
            SearchOutcome::NoMatch {
                request_name: query.to_string(),
            }
        } else {
            SearchOutcome::Matches(matches)
        }
    }

    /// First record whose name equals `name`, ignoring case
    pub fn find_exact(&self, name: &str) -> Option<&GuestRecord> {
        let needle = name.trim().to_lowercase();
        self.guests
            .iter()
            .find(|g| g.name.trim().to_lowercase() == needle)
    }

    /// Records sharing a name with another record; the update endpoint cannot tell them apart
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes = Vec::new();
        for guest in &self.guests {
            let key = guest.name.trim().to_lowercase();
            if !seen.insert(key) && !dupes.contains(&guest.name) {
                dupes.push(guest.name.clone());
            }
        }
        dupes
    }

    pub fn attending(&self) -> impl Iterator<Item = &GuestRecord> {
        self.guests.iter().filter(|g| g.is_attending())
    }

    pub fn summary(&self) -> RsvpSummary {
        summarize(&self.guests)
    }
}

/// Totals over any slice of records
pub fn summarize(guests: &[GuestRecord]) -> RsvpSummary {
    let mut summary = RsvpSummary::default();
    for guest in guests {
        match guest.status() {
            RsvpStatus::Attending => {
                summary.attending_entries += 1;
                summary.total_guests = summary.total_guests.saturating_add(guest.party_size());
            }
            RsvpStatus::Declined => summary.declined_entries += 1,
            RsvpStatus::Pending => summary.pending_entries += 1,
        }
    }
    summary
}
