use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use serde_json::{json, Value};

use vreport::shell::{set_silent, Credentials, SessionShell, SessionState, ShellError, LOGIN_FAILED};

/// Stand-in for the report API, recording what the shell sends.
#[derive(Clone)]
struct FakeBackend {
    login_status: StatusCode,
    overview_status: StatusCode,
    overview: Value,
    overview_hits: Arc<AtomicUsize>,
    login_bodies: Arc<Mutex<Vec<Value>>>,
}

impl FakeBackend {
    fn new(login_status: StatusCode, overview: Value) -> Self {
        Self {
            login_status,
            overview_status: StatusCode::OK,
            overview,
            overview_hits: Arc::new(AtomicUsize::new(0)),
            login_bodies: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn fake_login(State(fake): State<FakeBackend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    fake.login_bodies.lock().unwrap().push(body);
    (fake.login_status, Json(json!({})))
}

async fn fake_overview(State(fake): State<FakeBackend>) -> (StatusCode, Json<Value>) {
    fake.overview_hits.fetch_add(1, Ordering::SeqCst);
    (fake.overview_status, Json(fake.overview.clone()))
}

async fn spawn_backend(fake: FakeBackend) -> String {
    let app = Router::new()
        .route("/login", post(fake_login))
        .route("/overview", get(fake_overview))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn shell_for(url: &str) -> SessionShell {
    set_silent(true);
    SessionShell::new(reqwest::Client::new(), url)
}

fn admin() -> Credentials {
    Credentials::new("vc.example.com", "admin", "secret")
}

#[tokio::test]
async fn test_successful_login_loads_overview_once() {
    let fake = FakeBackend::new(StatusCode::OK, json!({"hosts": 3, "vms": 12}));
    let url = spawn_backend(fake.clone()).await;
    let shell = shell_for(&url);

    let mut state = SessionState::default();
    shell.login(&mut state, admin()).await.unwrap();

    assert!(state.logged_in);
    assert!(!state.shows_login_form());
    assert_eq!(state.message, "");
    assert_eq!(fake.overview_hits.load(Ordering::SeqCst), 1);

    let overview = state.overview.expect("overview loaded");
    assert_eq!(overview.as_value(), &json!({"hosts": 3, "vms": 12}));
    let round_trip: Value = serde_json::from_str(&overview.render()).unwrap();
    assert_eq!(round_trip, json!({"hosts": 3, "vms": 12}));
}

#[tokio::test]
async fn test_login_posts_credentials_as_json() {
    let fake = FakeBackend::new(StatusCode::OK, json!({}));
    let url = spawn_backend(fake.clone()).await;
    let shell = shell_for(&url);

    let mut state = SessionState::default();
    shell.login(&mut state, admin()).await.unwrap();

    let bodies = fake.login_bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({"server": "vc.example.com", "username": "admin", "password": "secret"})
    );
}

#[tokio::test]
async fn test_rejected_login_keeps_login_form() {
    for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN, StatusCode::INTERNAL_SERVER_ERROR] {
        let fake = FakeBackend::new(status, json!({}));
        let url = spawn_backend(fake.clone()).await;
        let shell = shell_for(&url);

        let mut state = SessionState::default();
        let err = shell.login(&mut state, admin()).await.unwrap_err();

        assert_eq!(err, ShellError::Authentication(LOGIN_FAILED.into()));
        assert!(!state.logged_in, "status {status}");
        assert!(state.shows_login_form());
        assert_eq!(state.message, "Login failed");
        assert!(state.overview.is_none());
        assert_eq!(fake.overview_hits.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_network_failure_surfaces_error_text() {
    // Grab a free port and release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let shell = shell_for(&format!("http://127.0.0.1:{}", port));

    let mut state = SessionState::default();
    let err = shell.login(&mut state, admin()).await.unwrap_err();

    assert!(matches!(err, ShellError::Authentication(_)));
    assert!(!state.logged_in);
    assert!(!state.message.is_empty());
    assert_ne!(state.message, LOGIN_FAILED);
    assert_eq!(state.message, err.to_string());
}

#[tokio::test]
async fn test_overview_failure_keeps_session_flag() {
    let mut fake = FakeBackend::new(StatusCode::OK, json!({"detail": "boom"}));
    fake.overview_status = StatusCode::BAD_GATEWAY;
    let url = spawn_backend(fake.clone()).await;
    let shell = shell_for(&url);

    let mut state = SessionState::default();
    let err = shell.login(&mut state, admin()).await.unwrap_err();

    assert!(matches!(err, ShellError::Overview(_)));
    assert!(state.logged_in);
    assert!(state.overview.is_none());
    assert!(state.message.starts_with("Failed to load overview"));
    assert_eq!(fake.overview_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_logout_returns_to_login_view() {
    let fake = FakeBackend::new(StatusCode::OK, json!({"hosts": 1}));
    let url = spawn_backend(fake).await;
    let shell = shell_for(&url);

    let mut state = SessionState::default();
    shell.login(&mut state, admin()).await.unwrap();
    shell.logout(&mut state);

    assert_eq!(state, SessionState::default());
    assert!(state.shows_login_form());
}

#[tokio::test]
async fn test_failed_relogin_drops_previous_login() {
    let accepting = spawn_backend(FakeBackend::new(StatusCode::OK, json!({"hosts": 1}))).await;
    let rejecting = spawn_backend(FakeBackend::new(StatusCode::FORBIDDEN, json!({}))).await;

    let mut state = SessionState::default();
    shell_for(&accepting).login(&mut state, admin()).await.unwrap();
    assert!(state.overview.is_some());

    let other = Credentials::new("vc2.example.com", "ops", "wrong");
    let err = shell_for(&rejecting).login(&mut state, other).await.unwrap_err();

    assert_eq!(err, ShellError::Authentication(LOGIN_FAILED.into()));
    assert!(!state.logged_in);
    assert!(state.overview.is_none());
    assert!(state.shows_login_form());
    assert_eq!(state.credentials.server, "vc2.example.com");
}

#[test]
fn test_serialized_state_omits_password() {
    let state = SessionState {
        credentials: admin(),
        ..SessionState::default()
    };
    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(value["credentials"], json!({"server": "vc.example.com", "username": "admin"}));
    assert!(!format!("{:?}", state).contains("secret"));
}
