//! Integration tests for the HTTP registry adapter.
//!
//! A small axum server stands in for the remote registry. These tests verify:
//! 1. Requests hit the documented paths with the expected bodies
//! 2. The bearer token from the store is attached to registry calls
//! 3. HTTP statuses map onto the booking error taxonomy

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use secrecy::Secret;
use serde_json::{json, Value};

use session_booking::adapters::{HttpRegistryClient, RegistryClientConfig};
use session_booking::application::{
    AuthSessionStore, BookingCoordinator, DeleteAccountHandler, LoginCommand, LoginHandler,
    RegisterCommand, RegisterHandler,
};
use session_booking::domain::foundation::{
    AuthError, Identity, InstructorId, SessionDate, SessionId, UserId,
};
use session_booking::domain::session::{BookingError, SessionDraft};

// =============================================================================
// Fake registry
// =============================================================================

const ADMIN_TOKEN: &str = "jwt-token";
const READ_ONLY_TOKEN: &str = "read-only-token";

#[derive(Default)]
struct Registry {
    sessions: BTreeMap<u64, Value>,
    next_id: u64,
    users: BTreeMap<u64, Value>,
    authorization: Vec<Option<String>>,
}

type Shared = Arc<Mutex<Registry>>;

fn record(state: &Shared, headers: &HeaderMap) -> Option<String> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.lock().unwrap().authorization.push(value.clone());
    value
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

async fn list_sessions(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if record(&state, &headers).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let sessions: Vec<Value> = state.lock().unwrap().sessions.values().cloned().collect();
    Json(sessions).into_response()
}

async fn create_session(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    match record(&state, &headers) {
        None => return StatusCode::UNAUTHORIZED.into_response(),
        Some(auth) if auth == format!("Bearer {}", READ_ONLY_TOKEN) => {
            return StatusCode::FORBIDDEN.into_response()
        }
        Some(_) => {}
    }
    let mut registry = state.lock().unwrap();
    let id = registry.next_id;
    registry.next_id += 1;
    body["id"] = json!(id);
    body["users"] = json!([]);
    body["createdAt"] = json!("2024-03-01T10:00:00");
    body["updatedAt"] = json!("2024-03-01T10:00:00");
    registry.sessions.insert(id, body.clone());
    Json(body).into_response()
}

async fn get_session(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    record(&state, &headers);
    match id {
        500 => message(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
        204 => (StatusCode::OK, "").into_response(),
        _ => match state.lock().unwrap().sessions.get(&id) {
            Some(session) => Json(session.clone()).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
    }
}

async fn update_session(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &headers);
    let mut registry = state.lock().unwrap();
    let Some(session) = registry.sessions.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    for key in ["name", "description", "date", "teacher_id"] {
        session[key] = body[key].clone();
    }
    session["updatedAt"] = json!("2024-03-02T09:30:00");
    Json(session.clone()).into_response()
}

async fn delete_session(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    record(&state, &headers);
    match state.lock().unwrap().sessions.remove(&id) {
        Some(_) => StatusCode::OK.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn participate(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, user)): Path<(u64, u64)>,
) -> Response {
    record(&state, &headers);
    let mut registry = state.lock().unwrap();
    let Some(session) = registry.sessions.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let users = session["users"].as_array_mut().unwrap();
    if users.contains(&json!(user)) {
        return StatusCode::BAD_REQUEST.into_response();
    }
    users.push(json!(user));
    StatusCode::OK.into_response()
}

async fn un_participate(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, user)): Path<(u64, u64)>,
) -> Response {
    record(&state, &headers);
    let mut registry = state.lock().unwrap();
    let Some(session) = registry.sessions.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let users = session["users"].as_array_mut().unwrap();
    let before = users.len();
    users.retain(|u| *u != json!(user));
    if users.len() == before {
        return StatusCode::BAD_REQUEST.into_response();
    }
    StatusCode::OK.into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == "yoga@studio.com" && body["password"] == "test!1234" {
        Json(json!({
            "token": ADMIN_TOKEN,
            "type": "Bearer",
            "id": 1,
            "username": "yoga@studio.com",
            "firstName": "Admin",
            "lastName": "Admin",
            "admin": true
        }))
        .into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "yoga@studio.com" {
        return message(StatusCode::BAD_REQUEST, "Error: Email is already taken!");
    }
    if body["firstName"].as_str().unwrap_or_default().is_empty() {
        return message(StatusCode::BAD_REQUEST, "firstName must not be blank");
    }
    message(StatusCode::OK, "User registered successfully!")
}

async fn list_teachers() -> Response {
    Json(json!([
        { "id": 1, "firstName": "Margot", "lastName": "DELAHAYE" },
        { "id": 2, "firstName": "Hélène", "lastName": "THIERCELIN" }
    ]))
    .into_response()
}

async fn get_teacher(Path(id): Path<u64>) -> Response {
    if id == 1 {
        Json(json!({
            "id": 1,
            "firstName": "Margot",
            "lastName": "DELAHAYE",
            "createdAt": "2024-01-01T00:00:00",
            "updatedAt": "2024-01-01T00:00:00"
        }))
        .into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn get_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    record(&state, &headers);
    match state.lock().unwrap().users.get(&id) {
        Some(user) => Json(user.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let auth = record(&state, &headers);
    if auth != Some(format!("Bearer token-{}", id)) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match state.lock().unwrap().users.remove(&id) {
        Some(_) => StatusCode::OK.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Starts the fake registry and returns its base URL and shared state.
async fn spawn_registry() -> (String, Shared) {
    let state: Shared = Arc::new(Mutex::new(Registry {
        next_id: 42,
        ..Default::default()
    }));
    state.lock().unwrap().users.insert(
        7,
        json!({
            "id": 7,
            "email": "toto@toto.com",
            "firstName": "toto",
            "lastName": "toto",
            "admin": false,
            "createdAt": "2024-01-01T00:00:00",
            "updatedAt": "2024-01-01T00:00:00"
        }),
    );

    let app = Router::new()
        .route("/api/session", get(list_sessions).post(create_session))
        .route(
            "/api/session/:id",
            get(get_session).put(update_session).delete(delete_session),
        )
        .route(
            "/api/session/:id/participate/:user",
            post(participate).delete(un_participate),
        )
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/teacher", get(list_teachers))
        .route("/api/teacher/:id", get(get_teacher))
        .route("/api/user/:id", get(get_user).delete(delete_user))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api", addr), state)
}

struct Harness {
    store: Arc<AuthSessionStore>,
    client: Arc<HttpRegistryClient>,
    coordinator: BookingCoordinator,
    state: Shared,
}

async fn harness() -> Harness {
    let (base_url, state) = spawn_registry().await;
    let store = Arc::new(AuthSessionStore::new());
    let config = RegistryClientConfig::new(base_url).with_timeout(Duration::from_secs(5));
    let client = Arc::new(HttpRegistryClient::new(config, store.clone()).unwrap());
    let coordinator =
        BookingCoordinator::new(store.clone(), client.clone(), client.clone(), client.clone());
    Harness {
        store,
        client,
        coordinator,
        state,
    }
}

fn yoga_draft() -> SessionDraft {
    SessionDraft::new(
        "Yoga",
        "Morning flow for all levels",
        SessionDate::from_ymd(2024, 3, 11).unwrap(),
        InstructorId::new(1),
    )
    .unwrap()
}

async fn log_in_admin(h: &Harness) {
    LoginHandler::new(h.client.clone(), h.store.clone())
        .handle(LoginCommand {
            email: "yoga@studio.com".to_string(),
            password: Secret::new("test!1234".to_string()),
        })
        .await
        .unwrap();
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn login_stores_identity_and_attaches_bearer_token() {
    let h = harness().await;

    log_in_admin(&h).await;
    let sessions = h.coordinator.list_sessions().await.unwrap();

    assert!(sessions.is_empty());
    let identity = h.store.current_identity().unwrap();
    assert!(identity.is_administrator());
    assert_eq!(identity.display_name(), "Admin Admin");
    assert_eq!(
        h.state.lock().unwrap().authorization,
        vec![Some("Bearer jwt-token".to_string())]
    );
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let h = harness().await;

    let err = LoginHandler::new(h.client.clone(), h.store.clone())
        .handle(LoginCommand {
            email: "yoga@studio.com".to_string(),
            password: Secret::new("nope".to_string()),
        })
        .await
        .unwrap_err();

    assert_eq!(err, AuthError::InvalidCredentials);
    assert!(!h.store.is_authenticated());
}

#[tokio::test]
async fn anonymous_list_is_unauthorized() {
    let h = harness().await;

    let err = h.coordinator.list_sessions().await.unwrap_err();

    assert_eq!(err, BookingError::Unauthorized);
    assert_eq!(h.state.lock().unwrap().authorization, vec![None]);
}

#[tokio::test]
async fn register_reports_registry_message() {
    let h = harness().await;
    let handler = RegisterHandler::new(h.client.clone());
    let command = |email: &str| RegisterCommand {
        email: email.to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        password: Secret::new("password123".to_string()),
    };

    let ok = handler.handle(command("john.doe@example.com")).await.unwrap();
    let taken = handler.handle(command("yoga@studio.com")).await.unwrap_err();

    assert_eq!(ok.message, "User registered successfully!");
    assert_eq!(
        taken,
        AuthError::RegistrationRejected("Error: Email is already taken!".to_string())
    );
    assert!(!h.store.is_authenticated());
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn admin_create_get_update_delete() {
    let h = harness().await;
    log_in_admin(&h).await;

    let created = h.coordinator.create_session(yoga_draft()).await.unwrap();
    assert_eq!(created.id(), Some(SessionId::new(42)));
    assert!(created.participants().is_empty());

    let fetched = h.coordinator.get_session(SessionId::new(42)).await.unwrap();
    assert_eq!(fetched, created);

    let sent = h.state.lock().unwrap().sessions[&42].clone();
    assert_eq!(sent["teacher_id"], 1);
    assert_eq!(sent["date"], "2024-03-11");

    let renamed = SessionDraft::new(
        "Yoga Nidra",
        "Evening relaxation",
        SessionDate::from_ymd(2024, 3, 12).unwrap(),
        InstructorId::new(1),
    )
    .unwrap();
    let updated = h
        .coordinator
        .update_session(SessionId::new(42), renamed)
        .await
        .unwrap();
    assert_eq!(updated.name(), "Yoga Nidra");
    assert!(updated.updated_at().unwrap().is_after(updated.created_at().unwrap()));

    h.coordinator.delete_session(SessionId::new(42)).await.unwrap();
    assert!(matches!(
        h.coordinator.delete_session(SessionId::new(42)).await,
        Err(BookingError::NotFound(_))
    ));
}

#[tokio::test]
async fn registry_forbidden_surfaces_verbatim() {
    let h = harness().await;
    h.store.log_in(Identity::new(READ_ONLY_TOKEN, UserId::new(3), true));

    let err = h.coordinator.create_session(yoga_draft()).await.unwrap_err();

    assert_eq!(err, BookingError::Forbidden);
}

#[tokio::test]
async fn participation_round_trip_and_errors() {
    let h = harness().await;
    log_in_admin(&h).await;
    let id = h
        .coordinator
        .create_session(yoga_draft())
        .await
        .unwrap()
        .id()
        .unwrap();
    let user = UserId::new(7);

    h.coordinator.participate(id, user).await.unwrap();
    assert!(matches!(
        h.coordinator.participate(id, user).await,
        Err(BookingError::Conflict(_))
    ));
    assert_eq!(h.coordinator.get_session(id).await.unwrap().participants(), &[user]);

    h.coordinator.un_participate(id, user).await.unwrap();
    assert!(!h.coordinator.get_session(id).await.unwrap().has_participant(user));
    assert!(matches!(
        h.coordinator.un_participate(id, user).await,
        Err(BookingError::NotFound(_))
    ));
    assert!(matches!(
        h.coordinator.participate(SessionId::new(999), user).await,
        Err(BookingError::NotFound(_))
    ));
}

#[tokio::test]
async fn lookup_failures_map_to_error_kinds() {
    let h = harness().await;
    log_in_admin(&h).await;

    assert!(matches!(
        h.coordinator.get_session(SessionId::new(1)).await,
        Err(BookingError::NotFound(_))
    ));
    assert!(matches!(
        h.coordinator.get_session(SessionId::new(204)).await,
        Err(BookingError::NotFound(_))
    ));

    let err = h.coordinator.get_session(SessionId::new(500)).await.unwrap_err();
    assert!(matches!(err, BookingError::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unreachable_registry_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = Arc::new(AuthSessionStore::new());
    let config = RegistryClientConfig::new(format!("http://{}/api", addr))
        .with_timeout(Duration::from_secs(2));
    let client = Arc::new(HttpRegistryClient::new(config, store.clone()).unwrap());
    let coordinator =
        BookingCoordinator::new(store.clone(), client.clone(), client.clone(), client.clone());

    let err = coordinator.list_sessions().await.unwrap_err();
    assert!(err.is_retryable());

    let login = LoginHandler::new(client, store.clone())
        .handle(LoginCommand {
            email: "yoga@studio.com".to_string(),
            password: Secret::new("test!1234".to_string()),
        })
        .await
        .unwrap_err();
    assert!(login.is_transient());
}

// =============================================================================
// Reference lookups
// =============================================================================

#[tokio::test]
async fn instructors_and_users() {
    let h = harness().await;
    log_in_admin(&h).await;

    let instructors = h.coordinator.list_instructors().await.unwrap();
    assert_eq!(instructors.len(), 2);

    let margot = h.coordinator.get_instructor(InstructorId::new(1)).await.unwrap();
    assert_eq!(margot.display_name(), "Margot DELAHAYE");
    assert!(matches!(
        h.coordinator.get_instructor(InstructorId::new(9)).await,
        Err(BookingError::NotFound(_))
    ));

    let toto = h.coordinator.get_user(UserId::new(7)).await.unwrap();
    assert_eq!(toto.email, "toto@toto.com");
    assert!(!toto.is_administrator);
}

#[tokio::test]
async fn delete_account_removes_user_and_logs_out() {
    let h = harness().await;
    h.store.log_in(Identity::new("token-7", UserId::new(7), false));

    let deleted = DeleteAccountHandler::new(h.client.clone(), h.store.clone())
        .handle()
        .await
        .unwrap();

    assert_eq!(deleted, UserId::new(7));
    assert!(!h.store.is_authenticated());
    assert!(h.state.lock().unwrap().users.is_empty());
}

#[tokio::test]
async fn delete_account_rejected_keeps_identity() {
    let h = harness().await;
    h.store.log_in(Identity::new("someone-else", UserId::new(7), false));

    let err = DeleteAccountHandler::new(h.client.clone(), h.store.clone())
        .handle()
        .await
        .unwrap_err();

    assert_eq!(err, BookingError::Unauthorized);
    assert!(h.store.is_authenticated());
}
