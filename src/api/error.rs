use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::vcenter::VcenterError;

/// JSON error body, `{"detail": "..."}`.
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Login failed")]
    LoginFailed,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("{0}")]
    Upstream(#[from] VcenterError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::LoginFailed | ApiError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            ApiError::Upstream(err) => {
                tracing::error!(error = %err, "vCenter request failed");
                StatusCode::BAD_GATEWAY
            }
        };
        (status, Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}
