//! HTTP clients against the fake sheet server

use super::common::fake_sheet::{FakeSheet, MESSAGE_FIELD, NAME_FIELD};
use serde_json::json;
use vows::api::{
    ApiError, EntourageMember, GuestApi, GuestRecord, GuestRequest, GuestUpdate, HttpGuestApi,
    HttpMessageWall, MessageWallApi, PrincipalSponsor,
};

fn client(sheet: &FakeSheet) -> HttpGuestApi {
    HttpGuestApi::new(sheet.base_url.clone(), None).expect("client")
}

#[tokio::test]
async fn test_list_guests_decodes_sheet_rows() {
    let sheet = FakeSheet::start(vec![
        GuestRecord::new("Juan Dela Cruz").with_rsvp("Yes", "2"),
        GuestRecord::new("Maria Santos"),
    ])
    .await;

    let guests = client(&sheet).list_guests().await.unwrap();
    assert_eq!(guests.len(), 2);
    assert_eq!(guests[0].name, "Juan Dela Cruz");
    assert!(guests[0].is_attending());
    assert_eq!(guests[0].party_size(), 2);
    assert!(!guests[1].has_responded());
}

#[tokio::test]
async fn test_update_sends_original_name() {
    let sheet = FakeSheet::start(vec![GuestRecord::new("Juan")]).await;
    let api = client(&sheet);

    let update = GuestUpdate {
        action: GuestUpdate::ACTION_UPDATE.to_string(),
        original_name: "Juan".to_string(),
        name: "Juan".to_string(),
        email: "Pending".to_string(),
        rsvp: "No".to_string(),
        guest: "0".to_string(),
        message: "Sorry!".to_string(),
    };
    api.update_guest(&update).await.unwrap();

    let state = sheet.state.lock();
    assert_eq!(state.updates, vec![update]);
    assert_eq!(state.guests[0].rsvp, "No");
    assert_eq!(state.guests[0].message, "Sorry!");
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let sheet = FakeSheet::start(Vec::new()).await;
    sheet.state.lock().fail_guests = true;

    let err = client(&sheet).list_guests().await.unwrap_err();
    match err {
        ApiError::Status {
            endpoint, status, ..
        } => {
            assert_eq!(endpoint, "/api/guests");
            assert_eq!(status, 500);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let api = HttpGuestApi::new("http://127.0.0.1:1", None).unwrap();
    let err = api.list_guests().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }), "{err:?}");
}

#[tokio::test]
async fn test_guest_request_is_posted() {
    let sheet = FakeSheet::start(Vec::new()).await;
    let request = GuestRequest {
        name: "Zoe".to_string(),
        email: "zoe@example.com".to_string(),
        phone: String::new(),
        guest: "2".to_string(),
        message: "Hope to make it".to_string(),
    };

    client(&sheet).create_guest_request(&request).await.unwrap();
    assert_eq!(sheet.state.lock().requests, vec![request]);
}

#[tokio::test]
async fn test_entourage_and_sponsors() {
    let sheet = FakeSheet::start(Vec::new()).await;
    {
        let mut state = sheet.state.lock();
        state.entourage = vec![EntourageMember::new("Paolo", "Couple", "Groom")];
        state.sponsors = vec![PrincipalSponsor::new("Mr. Reyes", "Mrs. Reyes")];
    }

    let api = client(&sheet);
    let members = api.list_entourage().await.unwrap();
    let sponsors = api.list_principal_sponsors().await.unwrap();
    assert_eq!(members[0].role_title, "Groom");
    assert_eq!(sponsors[0].female, "Mrs. Reyes");
}

#[tokio::test]
async fn test_message_wall_reads_newest_first() {
    let sheet = FakeSheet::start(Vec::new()).await;
    sheet.state.lock().wall_rows.extend([
        vec![json!("2025-06-01T10:00:00Z"), json!("Ana"), json!("First")],
        vec![json!("2025-06-02T10:00:00Z"), json!("Ben"), json!("Second")],
    ]);

    let wall = HttpMessageWall::new(sheet.wall_endpoints(), None).unwrap();
    let messages = wall.fetch_messages().await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].name, "Ben");
    assert_eq!(messages[1].message, "First");
}

#[tokio::test]
async fn test_message_wall_post_uses_field_ids() {
    let sheet = FakeSheet::start(Vec::new()).await;
    let wall = HttpMessageWall::new(sheet.wall_endpoints(), None).unwrap();

    // The form answers 400 and the post still counts as sent
    wall.post_message("Ana", "Congratulations!").await.unwrap();

    let state = sheet.state.lock();
    assert_eq!(state.wall_posts.len(), 1);
    assert_eq!(state.wall_posts[0][NAME_FIELD], "Ana");
    assert_eq!(state.wall_posts[0][MESSAGE_FIELD], "Congratulations!");
}
