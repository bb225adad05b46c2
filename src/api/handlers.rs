use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::ApiError;
use super::state::ApiState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub server: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverviewCounts {
    pub clusters: usize,
    pub hosts: usize,
    pub vms: usize,
    pub datastores: usize,
}

pub async fn login_post(
    State(state): State<ApiState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let server = match req.server.trim() {
        "" => state.default_server.clone().unwrap_or_default(),
        s => s.to_string(),
    };
    if server.is_empty() {
        return Err(ApiError::LoginFailed);
    }
    let session = match state
        .vcenter
        .create_session(&server, &req.username, &req.password)
        .await
    {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(%server, error = %e, "vCenter login failed");
            return Err(ApiError::LoginFailed);
        }
    };
    tracing::info!(%server, "vCenter session established");
    state.store_session(session);
    Ok(Json(json!({"status": "ok"})))
}

pub async fn overview_get(State(state): State<ApiState>) -> Result<Json<OverviewCounts>, ApiError> {
    let session = state.current_session().ok_or(ApiError::NotLoggedIn)?;
    let vc = &state.vcenter;
    let (clusters, hosts, vms, datastores) = tokio::try_join!(
        vc.list_clusters(&session),
        vc.list_hosts(&session),
        vc.list_vms(&session),
        vc.list_datastores(&session),
    )?;
    Ok(Json(OverviewCounts {
        clusters: clusters.len(),
        hosts: hosts.len(),
        vms: vms.len(),
        datastores: datastores.len(),
    }))
}
