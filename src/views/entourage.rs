use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::api::{ApiError, EntourageMember, GuestApi, PrincipalSponsor};
use crate::refresh::{spawn_refresh_listener, RefreshBus, RefreshSignal};
use crate::views::LoadState;

pub const LOAD_FAILED: &str = "Failed to load entourage";

/// Display order of role categories. Anything else follows in first-seen order.
pub const ROLE_CATEGORY_ORDER: &[&str] = &[
    "The Couple",
    "Parents of the Groom",
    "Parents of the Bride",
    "Principal Sponsor",
    "Best Man",
    "Maid/Matron of Honor",
    "Groomsmen",
    "Bridesmaids",
    "Candle Sponsors",
    "Veil Sponsors",
    "Cord Sponsors",
    "Ring/Coin Bearers",
    "Flower Girls/Boys",
    "Little Bride",
    "Little Groom",
    "Offerer",
];

const OTHER_CATEGORY: &str = "Other";
const FLOWER_CATEGORIES: &[&str] = &["Flower Girls", "Flower Boys"];
const ALWAYS_SINGLE: &[&str] = &["Offerer"];

/// Categories shown side by side as (left, right); the right one is not rendered on its own
const PAIRED_CATEGORIES: &[(&str, &str)] = &[
    ("Parents of the Groom", "Parents of the Bride"),
    ("Best Man", "Maid/Matron of Honor"),
    ("Groomsmen", "Bridesmaids"),
    ("Candle Sponsors", "Veil Sponsors"),
    ("Little Groom", "Little Bride"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub title: String,
}

impl From<&EntourageMember> for RosterEntry {
    fn from(member: &EntourageMember) -> Self {
        Self {
            name: member.name.clone(),
            title: member.role_title.clone(),
        }
    }
}

impl RosterEntry {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            title: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub left: Option<RosterEntry>,
    pub right: Option<RosterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterBody {
    /// One centered column
    Single(Vec<RosterEntry>),
    /// Two columns read row by row
    Pairs(Vec<RosterRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSection {
    pub title: String,
    /// Per-column headings for side-by-side sections
    pub column_titles: Option<(String, String)>,
    pub body: RosterBody,
}

impl RosterSection {
    pub fn len(&self) -> usize {
        match &self.body {
            RosterBody::Single(entries) => entries.len(),
            RosterBody::Pairs(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn zip_rows(left: Vec<RosterEntry>, right: Vec<RosterEntry>) -> Vec<RosterRow> {
    let len = left.len().max(right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    (0..len)
        .map(|_| RosterRow {
            left: left.next(),
            right: right.next(),
        })
        .collect()
}

fn entries(members: &[&EntourageMember]) -> Vec<RosterEntry> {
    members.iter().map(|m| RosterEntry::from(*m)).collect()
}

/// Fathers before mothers, otherwise sheet order
fn fathers_first(members: &[&EntourageMember]) -> Vec<RosterEntry> {
    let mut sorted: Vec<&EntourageMember> = members.to_vec();
    sorted.sort_by_key(|m| !m.role_title.to_lowercase().contains("father"));
    entries(&sorted)
}

/// Single column for short lists, otherwise two halves with the extra name on the left
fn single_or_split(title: &str, members: Vec<RosterEntry>) -> RosterSection {
    let body = if members.len() <= 2 || ALWAYS_SINGLE.contains(&title) {
        RosterBody::Single(members)
    } else {
        let half = members.len().div_ceil(2);
        let mut left = members;
        let right = left.split_off(half);
        RosterBody::Pairs(zip_rows(left, right))
    };
    RosterSection {
        title: title.to_string(),
        column_titles: None,
        body,
    }
}

/// Group members by category and lay them out for display
pub fn build_roster(members: &[EntourageMember], sponsors: &[PrincipalSponsor]) -> Vec<RosterSection> {
    let mut seen: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&EntourageMember>> = HashMap::new();
    for member in members {
        let category = match member.role_category.trim() {
            "" => OTHER_CATEGORY,
            category => category,
        };
        if !grouped.contains_key(category) {
            seen.push(category);
        }
        grouped.entry(category).or_default().push(member);
    }

    let empty: Vec<&EntourageMember> = Vec::new();
    let group = |category: &str| grouped.get(category).unwrap_or(&empty);

    let mut sections = Vec::new();
    for &category in ROLE_CATEGORY_ORDER {
        match category {
            "The Couple" => {
                let couple = group(category);
                if couple.is_empty() {
                    continue;
                }
                let groom = couple
                    .iter()
                    .find(|m| m.role_title.to_lowercase().contains("groom"));
                let bride = couple
                    .iter()
                    .find(|m| m.role_title.to_lowercase().contains("bride"));
                let body = if groom.is_none() && bride.is_none() {
                    RosterBody::Single(entries(couple))
                } else {
                    RosterBody::Pairs(vec![RosterRow {
                        left: groom.map(|m| RosterEntry::from(*m)),
                        right: bride.map(|m| RosterEntry::from(*m)),
                    }])
                };
                sections.push(RosterSection {
                    title: category.to_string(),
                    column_titles: None,
                    body,
                });
            }
            "Principal Sponsor" => {
                let rows: Vec<RosterRow> = sponsors
                    .iter()
                    .filter(|s| !s.is_blank())
                    .map(|s| RosterRow {
                        left: Some(s.male.trim())
                            .filter(|n| !n.is_empty())
                            .map(RosterEntry::named),
                        right: Some(s.female.trim())
                            .filter(|n| !n.is_empty())
                            .map(RosterEntry::named),
                    })
                    .collect();
                if !rows.is_empty() {
                    sections.push(RosterSection {
                        title: "Principal Sponsors".to_string(),
                        column_titles: None,
                        body: RosterBody::Pairs(rows),
                    });
                }
            }
            "Flower Girls/Boys" => {
                let flowers: Vec<RosterEntry> = std::iter::once(category)
                    .chain(FLOWER_CATEGORIES.iter().copied())
                    .flat_map(|c| group(c).iter().map(|m| RosterEntry::from(*m)))
                    .collect();
                if !flowers.is_empty() {
                    sections.push(single_or_split(category, flowers));
                }
            }
            "Cord Sponsors" if group(category).len() == 2 => {
                let cord = entries(group(category));
                let (left, right) = (cord[0].clone(), cord[1].clone());
                sections.push(RosterSection {
                    title: category.to_string(),
                    column_titles: None,
                    body: RosterBody::Pairs(vec![RosterRow {
                        left: Some(left),
                        right: Some(right),
                    }]),
                });
            }
            _ => {
                if let Some(&(left_cat, right_cat)) =
                    PAIRED_CATEGORIES.iter().find(|(l, r)| *l == category || *r == category)
                {
                    // Emit the pair once, at whichever half comes first in the order
                    let first = ROLE_CATEGORY_ORDER
                        .iter()
                        .find(|c| **c == left_cat || **c == right_cat);
                    if first != Some(&category) {
                        continue;
                    }
                    let (left, right) = (group(left_cat), group(right_cat));
                    if left.is_empty() && right.is_empty() {
                        continue;
                    }
                    let (left, right, title) = if left_cat.starts_with("Parents") {
                        (fathers_first(left), fathers_first(right), "Parents".to_string())
                    } else {
                        (entries(left), entries(right), format!("{left_cat} & {right_cat}"))
                    };
                    sections.push(RosterSection {
                        title,
                        column_titles: Some((left_cat.to_string(), right_cat.to_string())),
                        body: RosterBody::Pairs(zip_rows(left, right)),
                    });
                    continue;
                }

                let members = group(category);
                if !members.is_empty() {
                    sections.push(single_or_split(category, entries(members)));
                }
            }
        }
    }

    for category in seen {
        if ROLE_CATEGORY_ORDER.contains(&category) || FLOWER_CATEGORIES.contains(&category) {
            continue;
        }
        sections.push(single_or_split(category, entries(group(category))));
    }

    sections
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntourageSnapshot {
    pub load: LoadState,
    pub members: Vec<EntourageMember>,
    pub sponsors: Vec<PrincipalSponsor>,
}

impl EntourageSnapshot {
    pub fn roster(&self) -> Vec<RosterSection> {
        build_roster(&self.members, &self.sponsors)
    }
}

/// Entourage and principal sponsors, re-fetched on `entourageUpdated`
#[derive(Clone)]
pub struct EntourageView {
    api: Arc<dyn GuestApi>,
    state: Arc<Mutex<EntourageSnapshot>>,
}

impl EntourageView {
    pub fn new(api: Arc<dyn GuestApi>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(EntourageSnapshot::default())),
        }
    }

    /// Fetch both lists concurrently. Only an entourage failure fails the panel.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.state.lock().load = LoadState::Loading;

        let (members, sponsors) =
            tokio::join!(self.api.list_entourage(), self.api.list_principal_sponsors());

        let sponsors = sponsors.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load principal sponsors");
            Vec::new()
        });

        let mut state = self.state.lock();
        match members {
            Ok(members) => {
                tracing::debug!(
                    members = members.len(),
                    sponsors = sponsors.len(),
                    "Entourage refreshed"
                );
                *state = EntourageSnapshot {
                    load: LoadState::Loaded,
                    members,
                    sponsors,
                };
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load entourage");
                state.sponsors = sponsors;
                state.load = LoadState::Failed(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> EntourageSnapshot {
        self.state.lock().clone()
    }

    pub fn watch(&self, bus: &RefreshBus, delay: Duration) -> JoinHandle<()> {
        let view = self.clone();
        spawn_refresh_listener(bus, RefreshSignal::EntourageUpdated, delay, move || {
            let view = view.clone();
            async move {
                let _ = view.refresh().await;
            }
        })
    }
}
