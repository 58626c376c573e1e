//! Driving the full TUI with key events and a TestBackend

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vows::api::mock::{MockGuestApi, MockMessageWall};
use vows::api::{EntourageMember, GuestRecord, MessageWallApi, PrincipalSponsor};
use vows::ui::{Effect, InputMode, Tab};
use vows::{App, Config};

use super::common::terminal::{buffer_contains, buffer_to_string, render_app};

fn press(app: &mut App, code: KeyCode) -> Option<Effect> {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

async fn press_and_run(app: &mut App, code: KeyCode) {
    if let Some(effect) = press(app, code) {
        app.run_effect(effect).await;
    }
}

async fn loaded_app(api: &MockGuestApi, wall: Option<MockMessageWall>) -> App {
    let wall = wall.map(|w| Arc::new(w) as Arc<dyn MessageWallApi>);
    let mut app = App::new(Config::default(), Arc::new(api.clone()), wall);
    app.load_all().await;
    app
}

#[tokio::test]
async fn test_decline_shows_unable_to_attend() {
    let api = MockGuestApi::new().with_guests(vec![GuestRecord::new("Maria Santos")]);
    let mut app = loaded_app(&api, None).await;

    type_text(&mut app, "maria");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode(), InputMode::RsvpForm);

    press(&mut app, KeyCode::Char('n'));
    press_and_run(&mut app, KeyCode::Enter).await;

    let screen = render_app(&app, 100, 30);
    assert!(buffer_contains(&screen, "Unable to Attend"), "{}", buffer_to_string(&screen));
    assert_eq!(api.captured_updates()[0].guest, "0");
}

#[tokio::test]
async fn test_thank_you_closes_itself() {
    let api = MockGuestApi::new().with_guests(vec![GuestRecord::new("Juan")]);
    let mut app = loaded_app(&api, None).await;

    type_text(&mut app, "juan");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('y'));
    press_and_run(&mut app, KeyCode::Enter).await;
    assert_eq!(app.input_mode(), InputMode::RsvpForm);

    app.tick(Instant::now() + Duration::from_secs(4)).await;
    assert_eq!(app.input_mode(), InputMode::Search);
    assert!(app.flow().query().is_empty());
    assert!(app.flow().directory().guests()[0].is_attending());
}

#[tokio::test]
async fn test_validation_error_keeps_dialog_open() {
    let api = MockGuestApi::new().with_guests(vec![GuestRecord::new("Juan")]);
    let mut app = loaded_app(&api, None).await;

    type_text(&mut app, "juan");
    press(&mut app, KeyCode::Enter);
    press_and_run(&mut app, KeyCode::Enter).await;

    assert_eq!(app.input_mode(), InputMode::RsvpForm);
    let screen = render_app(&app, 100, 30);
    assert!(buffer_contains(&screen, "Please select if you can attend"));
    assert!(api.captured_updates().is_empty());
}

#[tokio::test]
async fn test_entourage_tab_pairs_couple() {
    let api = MockGuestApi::new()
        .with_entourage(vec![
            EntourageMember::new("Paolo Cruz", "The Couple", "Groom"),
            EntourageMember::new("Bea Lim", "The Couple", "Bride"),
        ])
        .with_sponsors(vec![PrincipalSponsor::new("Mr. Reyes", "Mrs. Reyes")]);
    let mut app = loaded_app(&api, None).await;

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.tab(), Tab::Entourage);

    let screen = render_app(&app, 100, 30);
    let text = buffer_to_string(&screen);
    let couple_row = text
        .lines()
        .find(|line| line.contains("Paolo Cruz"))
        .expect("groom rendered");
    assert!(couple_row.contains("Bea Lim"), "{text}");
    assert!(buffer_contains(&screen, "Mrs. Reyes"));
}

#[tokio::test]
async fn test_message_wall_post_failure_keeps_compose() {
    let api = MockGuestApi::new();
    let mut app = loaded_app(&api, Some(MockMessageWall::new().failing_post())).await;

    while app.tab() != Tab::Messages {
        press(&mut app, KeyCode::Tab);
    }
    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.input_mode(), InputMode::ComposeMessage);

    type_text(&mut app, "Ana");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Congratulations!");
    press_and_run(&mut app, KeyCode::Enter).await;

    assert_eq!(app.input_mode(), InputMode::ComposeMessage);
    let screen = render_app(&app, 100, 30);
    assert!(buffer_contains(&screen, "Unable to send message"));
}

#[tokio::test]
async fn test_message_wall_post_success() {
    let api = MockGuestApi::new();
    let wall = MockMessageWall::new();
    let mut app = loaded_app(&api, Some(wall.clone())).await;

    while app.tab() != Tab::Messages {
        press(&mut app, KeyCode::Tab);
    }
    let fetches = wall.fetch_calls();
    press(&mut app, KeyCode::Char('c'));
    type_text(&mut app, "Ana");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Congratulations!");
    press_and_run(&mut app, KeyCode::Enter).await;

    assert_eq!(app.input_mode(), InputMode::Browse);
    assert_eq!(wall.fetch_calls(), fetches + 1);
    let screen = render_app(&app, 100, 30);
    assert!(buffer_contains(&screen, "Congratulations!"));
    assert!(buffer_contains(&screen, "Message sent!"));
}

#[tokio::test]
async fn test_hidden_sections_drop_tabs() {
    let mut config = Config::default();
    config.display.show_entourage = false;
    let app = App::new(
        config,
        Arc::new(MockGuestApi::new()),
        Some(Arc::new(MockMessageWall::new())),
    );
    assert_eq!(app.tabs(), vec![Tab::Rsvp, Tab::GuestBook, Tab::Messages]);

    let app = App::new(Config::default(), Arc::new(MockGuestApi::new()), None);
    assert_eq!(app.tabs(), vec![Tab::Rsvp, Tab::GuestBook, Tab::Entourage]);
}
