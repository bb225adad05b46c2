use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::extract::Path;
use axum::{routing::{get, post}, Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use vreport::api::{build_api_router, ApiState, OverviewCounts};
use vreport::vcenter::{VcenterClient, VcenterSession, SESSION_HEADER};

const TOKEN: &str = "tok-123";
// base64("admin:secret")
const ADMIN_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

async fn fake_session(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let auth = headers.get("authorization").and_then(|v| v.to_str().ok());
    if auth == Some(ADMIN_AUTH) {
        (StatusCode::OK, Json(json!({"value": TOKEN})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"type": "unauthenticated"})))
    }
}

async fn fake_inventory(Path(kind): Path<String>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()) != Some(TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    let count = match kind.as_str() {
        "cluster" => 2,
        "host" => 3,
        "vm" => 12,
        "datastore" => 4,
        _ => return (StatusCode::NOT_FOUND, Json(json!({}))),
    };
    let items: Vec<Value> = (0..count).map(|i| json!({"name": format!("{kind}-{i}")})).collect();
    (StatusCode::OK, Json(json!({ "value": items })))
}

/// Fake vCenter appliance over plain HTTP; returns its `host:port`.
async fn spawn_vcenter() -> String {
    let app = Router::new()
        .route("/rest/com/vmware/cis/session", post(fake_session))
        .route("/rest/vcenter/:kind", get(fake_inventory));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr.to_string()
}

fn api(default_server: Option<String>) -> (Router, ApiState) {
    let state = ApiState::new(VcenterClient::new(reqwest::Client::new(), "http"), default_server);
    (build_api_router(state.clone()), state)
}

fn login_request(server: &str, username: &str, password: &str) -> Request<Body> {
    let body = json!({"server": server, "username": username, "password": password});
    Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn overview_request() -> Request<Body> {
    Request::builder().uri("/overview").body(Body::empty()).unwrap()
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_overview_requires_login() {
    let (app, _) = api(None);
    let resp = app.oneshot(overview_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await, json!({"detail": "Not logged in"}));
}

#[tokio::test]
async fn test_login_with_bad_password_is_rejected() {
    let server = spawn_vcenter().await;
    let (app, state) = api(None);

    let resp = app.oneshot(login_request(&server, "admin", "wrong")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await, json!({"detail": "Login failed"}));
    assert!(state.current_session().is_none());
}

#[tokio::test]
async fn test_login_then_overview_counts_inventory() {
    let server = spawn_vcenter().await;
    let (app, state) = api(None);

    let resp = app.clone().oneshot(login_request(&server, "admin", "secret")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({"status": "ok"}));
    assert_eq!(
        state.current_session(),
        Some(VcenterSession { server: server.clone(), token: TOKEN.into() })
    );

    let resp = app.oneshot(overview_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let counts: OverviewCounts = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(counts, OverviewCounts { clusters: 2, hosts: 3, vms: 12, datastores: 4 });
}

#[tokio::test]
async fn test_login_falls_back_to_default_server() {
    let server = spawn_vcenter().await;
    let (app, state) = api(Some(server.clone()));

    let resp = app.oneshot(login_request("", "admin", "secret")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.current_session().map(|s| s.server), Some(server));
}

#[tokio::test]
async fn test_login_without_any_server_fails() {
    let (app, _) = api(None);
    let resp = app.oneshot(login_request("  ", "admin", "secret")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_vcenter_session_is_bad_gateway() {
    let server = spawn_vcenter().await;
    let (app, state) = api(None);
    state.store_session(VcenterSession { server, token: "stale".into() });

    let resp = app.oneshot(overview_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("401"));
}
