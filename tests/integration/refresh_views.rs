//! Panels re-fetch on refresh signals after their own delay

use std::sync::Arc;
use std::time::{Duration, Instant};

use vows::api::mock::MockGuestApi;
use vows::api::{EntourageMember, GuestRecord};
use vows::refresh::{RefreshBus, RefreshSignal};
use vows::rsvp::{FlowTiming, RsvpChoice, RsvpFlow};
use vows::views::{EntourageView, GuestBookView};

async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_guest_book_refreshes_after_rsvp() {
    let api = MockGuestApi::new().with_guests(vec![GuestRecord::new("Juan")]);
    let bus = RefreshBus::new();
    let book = GuestBookView::new(Arc::new(api.clone()));
    let watcher = book.watch(&bus, Duration::from_millis(1500));

    let mut flow = RsvpFlow::new(Arc::new(api.clone()), bus.clone(), FlowTiming::default());
    flow.load_directory(Instant::now()).await.unwrap();
    flow.select_by_name("Juan");
    flow.set_choice(RsvpChoice::Yes);
    flow.submit(Instant::now()).await.unwrap();

    let before = api.list_guests_calls();
    tokio::time::sleep(Duration::from_millis(1499)).await;
    settle().await;
    assert_eq!(api.list_guests_calls(), before);

    tokio::time::sleep(Duration::from_millis(2)).await;
    settle().await;
    assert_eq!(api.list_guests_calls(), before + 1);
    assert_eq!(book.snapshot().entries.len(), 1);

    watcher.abort();
}

#[tokio::test(start_paused = true)]
async fn test_each_signal_triggers_its_own_fetch() {
    let api = MockGuestApi::new().with_guests(vec![GuestRecord::new("Juan").with_rsvp("Yes", "1")]);
    let bus = RefreshBus::new();
    let book = GuestBookView::new(Arc::new(api.clone()));
    let watcher = book.watch(&bus, Duration::from_millis(100));

    bus.publish(RefreshSignal::RsvpUpdated);
    bus.publish(RefreshSignal::RsvpUpdated);
    tokio::time::sleep(Duration::from_millis(250)).await;
    settle().await;
    assert_eq!(api.list_guests_calls(), 2);

    watcher.abort();
}

#[tokio::test(start_paused = true)]
async fn test_entourage_ignores_rsvp_signal() {
    let api = MockGuestApi::new()
        .with_entourage(vec![EntourageMember::new("Paolo", "Couple", "Groom")]);
    let bus = RefreshBus::new();
    let view = EntourageView::new(Arc::new(api.clone()));
    let watcher = view.watch(&bus, Duration::from_millis(200));

    bus.publish(RefreshSignal::RsvpUpdated);
    tokio::time::sleep(Duration::from_secs(1)).await;
    settle().await;
    assert_eq!(api.list_entourage_calls(), 0);

    bus.publish(RefreshSignal::EntourageUpdated);
    tokio::time::sleep(Duration::from_millis(201)).await;
    settle().await;
    assert_eq!(api.list_entourage_calls(), 1);
    assert_eq!(view.snapshot().members.len(), 1);

    watcher.abort();
}
