/// Side effects that should be executed outside the key reducer.
///
/// The event loop redraws before running one, so "Submitting..." states are visible
/// while the request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitRsvp,
    SubmitRequest,
    PostMessage { name: String, message: String },
    ReloadDirectory,
    RefreshGuestBook,
    RefreshEntourage,
    RefreshMessages,
}
