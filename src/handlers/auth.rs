use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::models::AppState;
use crate::shell::{Credentials, ShellError};

use super::helpers::{begin_login, end_session, finish_login};
use super::pages::render_login;

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    let (mut pending, jar) = begin_login(&state, jar);
    let credentials = Credentials {
        server: form.server.trim().to_string(),
        username: form.username.trim().to_string(),
        password: form.password,
    };
    let result = state.shell.login(&mut pending.session.state, credentials).await;
    if !finish_login(&state, &pending) {
        tracing::info!("Login finished after the session was closed; result dropped");
        return (jar, Redirect::to("/")).into_response();
    }
    match result {
        Ok(()) | Err(ShellError::Overview(_)) => (jar, Redirect::to("/")).into_response(),
        Err(ShellError::Authentication(_)) => {
            (jar, render_login(&state, &pending.session)).into_response()
        }
    }
}

pub async fn logout_post(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (removed, jar) = end_session(&state, jar);
    if let Some(mut session) = removed {
        state.shell.logout(&mut session.state);
    }
    (jar, Redirect::to("/")).into_response()
}
