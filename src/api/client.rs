use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::models::{
    EntourageMember, GuestRecord, GuestRequest, GuestUpdate, PrincipalSponsor,
};

/// Endpoint paths, relative to the configured base URL
pub mod endpoints {
    pub const GUESTS: &str = "/api/guests";
    pub const GUEST_REQUESTS: &str = "/api/guest-requests";
    pub const ENTOURAGE: &str = "/api/entourage";
    pub const PRINCIPAL_SPONSOR: &str = "/api/principal-sponsor";
}

/// The spreadsheet-backed guest API.
///
/// Every call is independent: no caching, no de-duplication, no retries.
#[async_trait]
pub trait GuestApi: Send + Sync {
    /// `GET /api/guests`
    async fn list_guests(&self) -> Result<Vec<GuestRecord>, ApiError>;

    /// `PUT /api/guests` with the "update" action
    async fn update_guest(&self, update: &GuestUpdate) -> Result<(), ApiError>;

    /// `POST /api/guest-requests`
    async fn create_guest_request(&self, request: &GuestRequest) -> Result<(), ApiError>;

    /// `GET /api/entourage`
    async fn list_entourage(&self) -> Result<Vec<EntourageMember>, ApiError>;

    /// `GET /api/principal-sponsor`
    async fn list_principal_sponsors(&self) -> Result<Vec<PrincipalSponsor>, ApiError>;
}
