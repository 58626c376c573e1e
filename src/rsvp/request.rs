use crate::api::{parse_party_size, GuestRequest};
use crate::rsvp::form::ValidationError;

/// "Request to join" form for people missing from the guest list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestRequestForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub guest: String,
    pub message: String,
}

impl Default for GuestRequestForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            guest: "1".to_string(),
            message: String::new(),
        }
    }
}

impl GuestRequestForm {
    /// Start a request with the name typed into the search box
    pub fn seeded(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if parse_party_size(&self.guest).is_none() {
            return Err(ValidationError::InvalidGuestCount);
        }
        Ok(())
    }

    pub fn to_request(&self) -> Result<GuestRequest, ValidationError> {
        self.validate()?;
        let guest = parse_party_size(&self.guest).ok_or(ValidationError::InvalidGuestCount)?;

        Ok(GuestRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            guest: guest.to_string(),
            message: self.message.clone(),
        })
    }
}
