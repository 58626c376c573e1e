use thiserror::Error;

use crate::api::{parse_party_size, GuestRecord, GuestUpdate, PENDING_EMAIL};

/// Client-side validation failures. The messages are shown to guests verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select if you can attend")]
    MissingChoice,

    #[error("Please enter the number of guests (minimum 1)")]
    InvalidGuestCount,

    #[error("Name is required")]
    MissingName,

    #[error("Please write a message")]
    MissingMessage,

    #[error("Message is too long ({len}/{max} characters)")]
    MessageTooLong { len: usize, max: usize },

    #[error("No guest selected")]
    NoGuestSelected,
}

/// Attendance answer picked in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpChoice {
    Yes,
    No,
}

impl RsvpChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpChoice::Yes => "Yes",
            RsvpChoice::No => "No",
        }
    }

    /// Parse a sheet value or CLI flag ("yes", "No", "y", ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" => Some(RsvpChoice::Yes),
            "no" | "n" => Some(RsvpChoice::No),
            _ => None,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            RsvpChoice::Yes => RsvpChoice::No,
            RsvpChoice::No => RsvpChoice::Yes,
        }
    }
}

/// Editable RSVP fields for one guest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpForm {
    pub name: String,
    pub email: String,
    pub choice: Option<RsvpChoice>,
    /// Party size as typed
    pub guest: String,
    pub message: String,
}

impl Default for RsvpForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            choice: None,
            guest: "1".to_string(),
            message: String::new(),
        }
    }
}

impl RsvpForm {
    /// Prefill from an existing sheet row
    pub fn from_record(record: &GuestRecord) -> Self {
        let guest = if record.guest.trim().is_empty() {
            "1".to_string()
        } else {
            record.guest.clone()
        };

        Self {
            name: record.name.clone(),
            email: record.display_email().unwrap_or_default().to_string(),
            choice: RsvpChoice::parse(&record.rsvp),
            guest,
            message: record.message.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let choice = self.choice.ok_or(ValidationError::MissingChoice)?;
        if choice == RsvpChoice::Yes && parse_party_size(&self.guest).is_none() {
            return Err(ValidationError::InvalidGuestCount);
        }
        Ok(())
    }

    /// Build the update payload keyed by the record's original name.
    ///
    /// Declines always send a party size of "0"; a blank email goes out as "Pending".
    pub fn to_update(&self, original_name: &str) -> Result<GuestUpdate, ValidationError> {
        self.validate()?;
        let choice = self.choice.ok_or(ValidationError::MissingChoice)?;

        let guest = match choice {
            RsvpChoice::Yes => parse_party_size(&self.guest)
                .ok_or(ValidationError::InvalidGuestCount)?
                .to_string(),
            RsvpChoice::No => "0".to_string(),
        };

        let email = if self.email.trim().is_empty() {
            PENDING_EMAIL.to_string()
        } else {
            self.email.trim().to_string()
        };

        Ok(GuestUpdate {
            action: GuestUpdate::ACTION_UPDATE.to_string(),
            original_name: original_name.to_string(),
            name: self.name.clone(),
            email,
            rsvp: choice.as_str().to_string(),
            guest,
            message: self.message.clone(),
        })
    }
}
