//! Guest-facing RSVP forms and the state machine that drives them

pub mod flow;
pub mod form;
pub mod notice;
pub mod request;

pub use flow::{FlowEvent, FlowTiming, RequestStage, RsvpError, RsvpFlow, RsvpStage};
pub use form::{RsvpChoice, RsvpForm, ValidationError};
pub use notice::{Notice, NoticeKind, NoticeSlot};
pub use request::GuestRequestForm;
