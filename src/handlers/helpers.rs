use std::sync::PoisonError;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use rand::RngCore;

use crate::models::{AppState, DashboardSession, NavLink};
use crate::routes::{Page, RouteError};
use crate::templates::BaseTemplate;

pub const SESSION_COOKIE: &str = "session_id";

pub fn random_session_id() -> String {
    let mut b = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut b);
    hex::encode(b)
}

pub fn session_id_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

fn session_cookie(sid: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, sid);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie
}

/// Navigate the caller's stored session to `path` and return a copy of it.
///
/// Visitors without a stored session get a fresh one that is never put in the
/// map; nothing is kept until they try to log in.
pub fn navigate_session(
    state: &AppState,
    jar: &CookieJar,
    path: &str,
) -> (DashboardSession, Result<Page, RouteError>) {
    let stored = {
        let mut sessions = state.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        match session_id_from_jar(jar) {
            Some(sid) => sessions.get_mut(&sid).map(|session| {
                let navigated = session.navigator.navigate(path);
                (session.clone(), navigated)
            }),
            None => None,
        }
    };
    stored.unwrap_or_else(|| {
        let mut session = DashboardSession::new(state.routes.clone());
        let navigated = session.navigator.navigate(path);
        (session, navigated)
    })
}

/// A login attempt in flight, as handed out by [`begin_login`].
pub struct PendingLogin {
    pub sid: String,
    pub attempt: u64,
    pub session: DashboardSession,
}

/// Register a login attempt, creating the session entry and its cookie if the
/// caller has none yet.
pub fn begin_login(state: &AppState, jar: CookieJar) -> (PendingLogin, CookieJar) {
    let mut sessions = state.sessions.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(sid) = session_id_from_jar(&jar) {
        if let Some(session) = sessions.get_mut(&sid) {
            session.login_attempt += 1;
            let pending = PendingLogin {
                sid,
                attempt: session.login_attempt,
                session: session.clone(),
            };
            return (pending, jar);
        }
    }
    let sid = random_session_id();
    let session = DashboardSession::new(state.routes.clone());
    sessions.insert(sid.clone(), session.clone());
    let pending = PendingLogin {
        sid: sid.clone(),
        attempt: session.login_attempt,
        session,
    };
    (pending, jar.add(session_cookie(sid)))
}

/// Write the outcome of a login back. Returns false when the entry was logged
/// out or picked up by a newer attempt in the meantime.
pub fn finish_login(state: &AppState, pending: &PendingLogin) -> bool {
    let mut sessions = state.sessions.lock().unwrap_or_else(PoisonError::into_inner);
    match sessions.get_mut(&pending.sid) {
        Some(session) if session.login_attempt == pending.attempt => {
            session.state = pending.session.state.clone();
            true
        }
        _ => false,
    }
}

/// Take the caller's session out of the map and clear the cookie.
pub fn end_session(state: &AppState, jar: CookieJar) -> (Option<DashboardSession>, CookieJar) {
    let removed = session_id_from_jar(&jar).and_then(|sid| {
        state
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&sid)
    });
    (removed, jar.remove(session_cookie(String::new())))
}

pub fn build_nav(state: &AppState, active: Page) -> Vec<NavLink> {
    state
        .routes
        .entries()
        .iter()
        .filter(|entry| entry.page != Page::Login)
        .map(|entry| NavLink {
            path: entry.path.clone(),
            title: entry.page.title().to_string(),
            active: entry.page == active,
        })
        .collect()
}

#[derive(Default)]
pub struct TemplateGlobals {
    pub nav: Vec<NavLink>,
    pub backend_host: String,
    pub logged_in: bool,
}

pub fn build_template_globals(state: &AppState, session: &DashboardSession) -> TemplateGlobals {
    TemplateGlobals {
        nav: build_nav(state, session.navigator.active()),
        backend_host: crate::util::hostname_from_url(state.shell.backend_url()),
        logged_in: session.state.logged_in,
    }
}

/// Message to show, if any.
pub fn pending_message(session: &DashboardSession) -> Option<String> {
    session
        .state
        .has_message()
        .then(|| session.state.message.clone())
}

pub fn render_template<T: askama::Template + BaseTemplate>(t: T) -> Response {
    tracing::debug!(
        backend = t.backend_host(),
        logged_in = t.logged_in(),
        links = t.nav().len(),
        "Rendering page"
    );
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
