//! Report API: the `/login` and `/overview` endpoints the session shell calls.

mod error;
mod handlers;
mod state;

use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use handlers::{LoginRequest, OverviewCounts};
pub use state::ApiState;

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route("/login", post(handlers::login_post))
        .route("/overview", get(handlers::overview_get))
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=31536000, immutable"),
                ))
                .service(ServeDir::new("static")),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
