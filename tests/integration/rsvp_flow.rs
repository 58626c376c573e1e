//! The RSVP flow end to end over HTTP

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::common::fake_sheet::FakeSheet;
use vows::api::{GuestApi, GuestRecord, HttpGuestApi};
use vows::refresh::{RefreshBus, RefreshSignal};
use vows::rsvp::{
    FlowEvent, FlowTiming, RequestStage, RsvpChoice, RsvpError, RsvpFlow, RsvpStage,
    ValidationError,
};
use vows::views::GuestBookView;
use vows::SearchOutcome;

async fn flow_for(sheet: &FakeSheet, bus: RefreshBus) -> RsvpFlow {
    let api: Arc<dyn GuestApi> = Arc::new(HttpGuestApi::new(sheet.base_url.clone(), None).unwrap());
    let mut flow = RsvpFlow::new(api, bus, FlowTiming::default());
    flow.load_directory(Instant::now()).await.unwrap();
    flow
}

#[tokio::test]
async fn test_guest_finds_name_and_accepts() {
    let sheet = FakeSheet::start(vec![
        GuestRecord::new("Juan Dela Cruz"),
        GuestRecord::new("Juana Reyes"),
        GuestRecord::new("Maria Santos"),
    ])
    .await;
    let bus = RefreshBus::new();
    let mut signals = bus.subscribe();
    let mut flow = flow_for(&sheet, bus).await;

    flow.set_query("JUAN");
    assert_eq!(flow.outcome().match_count(), 2);

    assert!(flow.select_by_name("juan dela cruz"));
    assert_eq!(flow.stage(), RsvpStage::Editing);

    flow.set_choice(RsvpChoice::Yes);
    flow.form_mut().guest = "3".to_string();
    flow.form_mut().message = "See you there!".to_string();

    let now = Instant::now();
    flow.submit(now).await.unwrap();
    assert_eq!(flow.stage(), RsvpStage::Responded);
    assert_eq!(flow.notice().success_text(), Some("Thank you for your response!"));
    assert_eq!(signals.try_recv().unwrap(), RefreshSignal::RsvpUpdated);

    {
        let state = sheet.state.lock();
        let update = &state.updates[0];
        assert_eq!(update.original_name, "Juan Dela Cruz");
        assert_eq!(update.rsvp, "Yes");
        assert_eq!(update.guest, "3");
        assert_eq!(update.email, "Pending");
    }

    // The thank-you view closes on its own and the list is re-read
    let fetches = sheet.state.lock().guest_fetches;
    let events = flow.poll(now + Duration::from_secs(3)).await;
    assert!(events.contains(&FlowEvent::ModalClosed));
    assert_eq!(flow.stage(), RsvpStage::Searching);
    assert!(flow.query().is_empty());
    assert_eq!(sheet.state.lock().guest_fetches, fetches + 1);
    assert!(flow.directory().guests()[0].is_attending());
}

#[tokio::test]
async fn test_validation_never_reaches_server() {
    let sheet = FakeSheet::start(vec![GuestRecord::new("Juan")]).await;
    let mut flow = flow_for(&sheet, RefreshBus::new()).await;

    assert!(flow.select_by_name("Juan"));
    let err = flow.submit(Instant::now()).await.unwrap_err();
    assert!(matches!(err, RsvpError::Validation(_)));
    assert_eq!(flow.notice().error_text(), Some("Please select if you can attend"));
    assert!(sheet.state.lock().updates.is_empty());
}

#[tokio::test]
async fn test_attending_with_zero_guests_is_rejected_locally() {
    let sheet = FakeSheet::start(vec![GuestRecord::new("Juan")]).await;
    let mut flow = flow_for(&sheet, RefreshBus::new()).await;

    assert!(flow.select_by_name("Juan"));
    flow.set_choice(RsvpChoice::Yes);
    flow.form_mut().guest = "0".to_string();

    let now = Instant::now();
    let err = flow.submit(now).await.unwrap_err();
    assert!(matches!(
        err,
        RsvpError::Validation(ValidationError::InvalidGuestCount)
    ));
    assert_eq!(flow.stage(), RsvpStage::Editing);
    assert_eq!(
        flow.notice().error_text(),
        Some("Please enter the number of guests (minimum 1)")
    );
    assert!(sheet.state.lock().updates.is_empty());

    // The error notice lingers for five seconds
    assert!(flow.tick(now + Duration::from_secs(4)).is_empty());
    assert!(flow.notice().error_text().is_some());
    let events = flow.tick(now + Duration::from_secs(5));
    assert!(events.contains(&FlowEvent::NoticeDismissed));
    assert!(flow.notice().error_text().is_none());
}

#[tokio::test]
async fn test_responded_guest_lands_on_thank_you() {
    let sheet =
        FakeSheet::start(vec![GuestRecord::new("Maria").with_rsvp("No", "0")]).await;
    let mut flow = flow_for(&sheet, RefreshBus::new()).await;

    assert!(flow.select_by_name("maria"));
    assert_eq!(flow.stage(), RsvpStage::Responded);
    assert!(!flow.selected().unwrap().is_attending());
}

#[tokio::test]
async fn test_unknown_name_becomes_request() {
    let sheet = FakeSheet::start(vec![GuestRecord::new("Juan")]).await;
    let mut flow = flow_for(&sheet, RefreshBus::new()).await;

    flow.set_query("Zoe Tan");
    match flow.outcome() {
        SearchOutcome::NoMatch { request_name } => assert_eq!(request_name, "Zoe Tan"),
        other => panic!("expected no match, got {other:?}"),
    }

    flow.open_request();
    flow.request_mut().unwrap().guest = "2".to_string();
    let now = Instant::now();
    flow.submit_request(now).await.unwrap();
    assert_eq!(flow.request_stage(), Some(RequestStage::Submitted));

    let requests = sheet.state.lock().requests.clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].name, "Zoe Tan");
    assert_eq!(requests[0].guest, "2");

    let events = flow.poll(now + Duration::from_secs(3)).await;
    assert!(events.contains(&FlowEvent::RequestClosed));
    assert_eq!(flow.request_stage(), None);
}

#[tokio::test]
async fn test_load_failure_shows_notice() {
    let sheet = FakeSheet::start(Vec::new()).await;
    sheet.state.lock().fail_guests = true;

    let api: Arc<dyn GuestApi> = Arc::new(HttpGuestApi::new(sheet.base_url.clone(), None).unwrap());
    let mut flow = RsvpFlow::new(api, RefreshBus::new(), FlowTiming::default());
    assert!(flow.load_directory(Instant::now()).await.is_err());
    assert_eq!(flow.notice().error_text(), Some("Failed to load guest list"));
    assert!(flow.directory().is_empty());
}

#[tokio::test]
async fn test_guest_book_reflects_submission() {
    let sheet = FakeSheet::start(vec![GuestRecord::new("Juan")]).await;
    let api: Arc<dyn GuestApi> = Arc::new(HttpGuestApi::new(sheet.base_url.clone(), None).unwrap());
    let book = GuestBookView::new(api);
    book.refresh().await.unwrap();
    assert!(book.snapshot().entries.is_empty());

    let mut flow = flow_for(&sheet, RefreshBus::new()).await;
    flow.select_by_name("Juan");
    flow.set_choice(RsvpChoice::Yes);
    flow.form_mut().guest = "2".to_string();
    flow.submit(Instant::now()).await.unwrap();

    book.refresh().await.unwrap();
    let snapshot = book.snapshot();
    assert_eq!(snapshot.total_guests, 2);
    assert_eq!(snapshot.headline(), "2 Guests Celebrating With Us");
}
