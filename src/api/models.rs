//! Wire types for the spreadsheet-backed guest APIs.
//!
//! Field names follow the spreadsheet column headers (`Name`, `RSVP`, ...), so every
//! struct carries explicit serde renames.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Email placeholder the spreadsheet uses for guests who have not given one.
pub const PENDING_EMAIL: &str = "Pending";

/// A row of the guest sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "Email", default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(rename = "RSVP", default, deserialize_with = "lenient_string")]
    pub rsvp: String,
    /// Party size, string-encoded by the sheet
    #[serde(rename = "Guest", default, deserialize_with = "lenient_string")]
    pub guest: String,
    #[serde(rename = "Message", default, deserialize_with = "lenient_string")]
    pub message: String,
}

/// Attendance state derived from the RSVP column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpStatus {
    Attending,
    Declined,
    Pending,
}

impl RsvpStatus {
    pub fn parse(value: &str) -> Self {
        if value == "Yes" {
            RsvpStatus::Attending
        } else if value.trim().is_empty() {
            RsvpStatus::Pending
        } else {
            RsvpStatus::Declined
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RsvpStatus::Attending => "Attending",
            RsvpStatus::Declined => "Unable to attend",
            RsvpStatus::Pending => "Awaiting reply",
        }
    }
}

impl GuestRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_rsvp(mut self, rsvp: &str, guest: &str) -> Self {
        self.rsvp = rsvp.to_string();
        self.guest = guest.to_string();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    pub fn status(&self) -> RsvpStatus {
        RsvpStatus::parse(&self.rsvp)
    }

    /// Whether the guest has answered at all (any non-blank RSVP)
    pub fn has_responded(&self) -> bool {
        self.status() != RsvpStatus::Pending
    }

    pub fn is_attending(&self) -> bool {
        self.status() == RsvpStatus::Attending
    }

    /// Party size coerced to a positive integer, defaulting to 1.
    pub fn party_size(&self) -> u32 {
        parse_party_size(&self.guest).unwrap_or(1)
    }

    /// Email worth showing, hiding blanks and the "Pending" placeholder
    pub fn display_email(&self) -> Option<&str> {
        let email = self.email.trim();
        if email.is_empty() || email == PENDING_EMAIL {
            None
        } else {
            Some(email)
        }
    }
}

/// Parse the leading integer of a sheet cell, accepting only values >= 1.
///
/// Mirrors the lenient way spreadsheet cells are read: surrounding whitespace and
/// trailing junk after the digits ("2 pax") are ignored.
pub fn parse_party_size(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    let digits: String = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().ok().filter(|n| *n >= 1)
}

/// Body of `PUT /api/guests`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestUpdate {
    pub action: String,
    /// Match key on the server side; the record's name before any edit
    #[serde(rename = "originalName")]
    pub original_name: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "RSVP")]
    pub rsvp: String,
    #[serde(rename = "Guest")]
    pub guest: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl GuestUpdate {
    pub const ACTION_UPDATE: &'static str = "update";
}

/// Body of `POST /api/guest-requests`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRequest {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    #[serde(rename = "Guest")]
    pub guest: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

/// A member of the wedding party
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntourageMember {
    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "RoleCategory", default, deserialize_with = "lenient_string")]
    pub role_category: String,
    #[serde(rename = "RoleTitle", default, deserialize_with = "lenient_string")]
    pub role_title: String,
    #[serde(rename = "Email", default, deserialize_with = "lenient_string")]
    pub email: String,
}

impl EntourageMember {
    pub fn new(name: &str, category: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            role_category: category.to_string(),
            role_title: title.to_string(),
            email: String::new(),
        }
    }
}

/// One row of the principal sponsor sheet, a male/female pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalSponsor {
    #[serde(
        rename = "MalePrincipalSponsor",
        default,
        deserialize_with = "lenient_string"
    )]
    pub male: String,
    #[serde(
        rename = "FemalePrincipalSponsor",
        default,
        deserialize_with = "lenient_string"
    )]
    pub female: String,
}

impl PrincipalSponsor {
    pub fn new(male: &str, female: &str) -> Self {
        Self {
            male: male.to_string(),
            female: female.to_string(),
        }
    }

    /// Rows with neither name filled are spreadsheet padding
    pub fn is_blank(&self) -> bool {
        self.male.trim().is_empty() && self.female.trim().is_empty()
    }
}

/// A message left on the guest book wall
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallMessage {
    pub timestamp: String,
    pub name: String,
    pub message: String,
}

/// Response of the message wall script endpoint: a header row followed by data rows
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetData {
    #[serde(rename = "GoogleSheetData", default)]
    pub rows: Vec<Vec<Value>>,
}

/// Accept strings, numbers, booleans or null for a text column.
///
/// Sheet automation happily returns `2` instead of `"2"` for numeric cells.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(cell_to_string(&value))
}

/// Render a sheet cell as text
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_record_deserializes_sheet_row() {
        let json = r#"{"Name":"Juan Dela Cruz","Email":"Pending","RSVP":"","Guest":"","Message":""}"#;
        let record: GuestRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Juan Dela Cruz");
        assert_eq!(record.status(), RsvpStatus::Pending);
        assert!(!record.has_responded());
        assert_eq!(record.display_email(), None);
        assert_eq!(record.party_size(), 1);
    }

    #[test]
    fn test_guest_record_numeric_and_missing_cells() {
        let json = r#"{"Name":"Ana","RSVP":"Yes","Guest":3}"#;
        let record: GuestRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.guest, "3");
        assert_eq!(record.party_size(), 3);
        assert!(record.is_attending());
        assert_eq!(record.email, "");
        assert_eq!(record.message, "");
    }

    #[test]
    fn test_party_size_coercion() {
        assert_eq!(parse_party_size("2"), Some(2));
        assert_eq!(parse_party_size(" 4 "), Some(4));
        assert_eq!(parse_party_size("2 pax"), Some(2));
        assert_eq!(parse_party_size("0"), None);
        assert_eq!(parse_party_size("-1"), None);
        assert_eq!(parse_party_size("abc"), None);
        assert_eq!(parse_party_size(""), None);

        let record = GuestRecord::new("A").with_rsvp("Yes", "0");
        assert_eq!(record.party_size(), 1);
    }

    #[test]
    fn test_rsvp_status_parse() {
        assert_eq!(RsvpStatus::parse("Yes"), RsvpStatus::Attending);
        assert_eq!(RsvpStatus::parse("No"), RsvpStatus::Declined);
        assert_eq!(RsvpStatus::parse("  "), RsvpStatus::Pending);
        // Only the exact "Yes" counts toward attendance
        assert_eq!(RsvpStatus::parse("yes"), RsvpStatus::Declined);
        assert_eq!(RsvpStatus::parse("Yes "), RsvpStatus::Declined);
    }

    #[test]
    fn test_guest_update_wire_format() {
        let update = GuestUpdate {
            action: GuestUpdate::ACTION_UPDATE.to_string(),
            original_name: "Juan".into(),
            name: "Juan Dela Cruz".into(),
            email: "Pending".into(),
            rsvp: "Yes".into(),
            guest: "2".into(),
            message: "See you!".into(),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["action"], "update");
        assert_eq!(value["originalName"], "Juan");
        assert_eq!(value["Name"], "Juan Dela Cruz");
        assert_eq!(value["RSVP"], "Yes");
        assert_eq!(value["Guest"], "2");
    }

    #[test]
    fn test_sponsor_blank_rows() {
        assert!(PrincipalSponsor::new("", " ").is_blank());
        assert!(!PrincipalSponsor::new("Mr. Santos", "").is_blank());
    }
}
