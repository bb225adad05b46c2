//! Server-rendered dashboard: every page is resolved through the route table.

use axum::{
    http::header::CONTENT_TYPE,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

// Embed the default stylesheet in the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

pub fn build_app(state: AppState) -> Router {
    // Always serve styles.css - use custom if provided, otherwise use embedded default
    let stylesheet_content = state
        .custom_css
        .clone()
        .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    Router::new()
        .route(
            "/",
            get(handlers::pages::page_get).post(handlers::auth::login_post),
        )
        .route("/logout", post(handlers::auth::logout_post))
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet_content.clone();
                async move { ([(CONTENT_TYPE, "text/css")], css) }
            }),
        )
        .fallback(handlers::pages::page_get)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
