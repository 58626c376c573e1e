pub mod client;
pub mod error;
pub mod http;
pub mod message_wall;
pub mod mock;
pub mod models;

pub use client::{endpoints, GuestApi};
pub use error::ApiError;
pub use http::HttpGuestApi;
pub use message_wall::{
    parse_sheet_messages, HttpMessageWall, MessageWallApi, MessageWallEndpoints, MAX_MESSAGE_LEN,
};
pub use models::{
    parse_party_size, EntourageMember, GuestRecord, GuestRequest, GuestUpdate, PrincipalSponsor,
    RsvpStatus, SheetData, WallMessage, PENDING_EMAIL,
};
