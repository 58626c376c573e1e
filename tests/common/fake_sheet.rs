//! Fake spreadsheet backend for HTTP client tests
//!
//! Serves the guest API routes plus a message wall script/form pair on a loopback port.
//! Writes are applied to in-memory state the way the sheet automation would.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use vows::api::{
    EntourageMember, GuestRecord, GuestRequest, GuestUpdate, MessageWallEndpoints,
    PrincipalSponsor,
};

pub const NAME_FIELD: &str = "entry.111";
pub const MESSAGE_FIELD: &str = "entry.222";

#[derive(Default)]
pub struct SheetState {
    pub guests: Vec<GuestRecord>,
    pub entourage: Vec<EntourageMember>,
    pub sponsors: Vec<PrincipalSponsor>,
    /// Header row first, like the script endpoint returns it
    pub wall_rows: Vec<Vec<Value>>,
    pub updates: Vec<GuestUpdate>,
    pub requests: Vec<GuestRequest>,
    pub wall_posts: Vec<HashMap<String, String>>,
    pub fail_guests: bool,
    pub guest_fetches: usize,
}

type Shared = Arc<Mutex<SheetState>>;

pub struct FakeSheet {
    pub base_url: String,
    pub state: Shared,
}

impl FakeSheet {
    /// Start the server on 127.0.0.1 with the given guests
    pub async fn start(guests: Vec<GuestRecord>) -> Self {
        let state: Shared = Arc::new(Mutex::new(SheetState {
            guests,
            wall_rows: vec![vec![json!("Timestamp"), json!("Name"), json!("Message")]],
            ..Default::default()
        }));

        let app = Router::new()
            .route("/api/guests", get(list_guests).put(update_guest))
            .route("/api/guest-requests", post(create_request))
            .route("/api/entourage", get(list_entourage))
            .route("/api/principal-sponsor", get(list_sponsors))
            .route("/wall/script", get(wall_rows))
            .route("/wall/form", post(wall_post))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake sheet");
        let addr = listener.local_addr().expect("No local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn wall_endpoints(&self) -> MessageWallEndpoints {
        MessageWallEndpoints {
            form_url: format!("{}/wall/form", self.base_url),
            script_url: format!("{}/wall/script", self.base_url),
            name_field: NAME_FIELD.to_string(),
            message_field: MESSAGE_FIELD.to_string(),
        }
    }
}

async fn list_guests(State(state): State<Shared>) -> Result<Json<Vec<GuestRecord>>, StatusCode> {
    let mut state = state.lock();
    state.guest_fetches += 1;
    if state.fail_guests {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(state.guests.clone()))
}

async fn update_guest(State(state): State<Shared>, Json(update): Json<GuestUpdate>) -> StatusCode {
    let mut state = state.lock();
    if let Some(record) = state
        .guests
        .iter_mut()
        .find(|g| g.name == update.original_name)
    {
        record.name = update.name.clone();
        record.email = update.email.clone();
        record.rsvp = update.rsvp.clone();
        record.guest = update.guest.clone();
        record.message = update.message.clone();
    }
    state.updates.push(update);
    StatusCode::OK
}

async fn create_request(
    State(state): State<Shared>,
    Json(request): Json<GuestRequest>,
) -> StatusCode {
    state.lock().requests.push(request);
    StatusCode::CREATED
}

async fn list_entourage(State(state): State<Shared>) -> Json<Vec<EntourageMember>> {
    Json(state.lock().entourage.clone())
}

async fn list_sponsors(State(state): State<Shared>) -> Json<Vec<PrincipalSponsor>> {
    Json(state.lock().sponsors.clone())
}

async fn wall_rows(State(state): State<Shared>) -> Json<Value> {
    Json(json!({ "GoogleSheetData": state.lock().wall_rows.clone() }))
}

async fn wall_post(
    State(state): State<Shared>,
    Form(params): Form<HashMap<String, String>>,
) -> StatusCode {
    state.lock().wall_posts.push(params);
    // Form hosts answer opaquely; the client must not care
    StatusCode::BAD_REQUEST
}
