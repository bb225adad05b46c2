use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::capacity::{parse_utilization, remaining_capacity, MAX_UTILIZATION_PCT};
use crate::models::{AppState, CapacityRow, DashboardSession};
use crate::routes::Page;
use crate::templates::{
    CapacityTemplate, LoginTemplate, NotFoundTemplate, OverviewTemplate, SectionTemplate,
};

use super::helpers::{
    build_template_globals, navigate_session, pending_message, render_template,
    TemplateGlobals,
};

/// Every dashboard page goes through here; the route table decides what to render.
pub async fn page_get(
    State(state): State<AppState>,
    jar: CookieJar,
    uri: Uri,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let (session, navigated) = navigate_session(&state, &jar, uri.path());

    let page = match navigated {
        Ok(page) => page,
        Err(e) => {
            tracing::debug!(%e, "Unknown dashboard route");
            return render_not_found(&state, &session, uri.path());
        }
    };

    match page {
        Page::Login if session.state.logged_in => render_overview(&state, &session),
        Page::Login => render_login(&state, &session),
        Page::Overview => render_overview(&state, &session),
        Page::Capacity => render_capacity(&state, &session, &q),
        other => render_section(&state, &session, other),
    }
}

pub fn render_login(state: &AppState, session: &DashboardSession) -> Response {
    let TemplateGlobals {
        nav,
        backend_host,
        logged_in,
    } = build_template_globals(state, session);
    render_template(LoginTemplate {
        nav,
        backend_host,
        logged_in,
        server: session.state.credentials.server.clone(),
        username: session.state.credentials.username.clone(),
        message: pending_message(session),
    })
}

fn render_overview(state: &AppState, session: &DashboardSession) -> Response {
    let TemplateGlobals {
        nav,
        backend_host,
        logged_in,
    } = build_template_globals(state, session);
    render_template(OverviewTemplate {
        nav,
        backend_host,
        logged_in,
        server: session.state.credentials.server.clone(),
        username: session.state.credentials.username.clone(),
        overview: session.state.overview.as_ref().map(|o| o.render()),
        message: pending_message(session),
    })
}

fn render_section(state: &AppState, session: &DashboardSession, page: Page) -> Response {
    let TemplateGlobals {
        nav,
        backend_host,
        logged_in,
    } = build_template_globals(state, session);
    render_template(SectionTemplate {
        nav,
        backend_host,
        logged_in,
        title: page.title().to_string(),
    })
}

fn render_capacity(
    state: &AppState,
    session: &DashboardSession,
    q: &HashMap<String, String>,
) -> Response {
    // Empty inputs come from the blank form fields
    let entries: Vec<String> = q
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    let (rows, error) = match parse_utilization(&entries) {
        Ok(utilization) => (capacity_rows(&utilization), None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };
    let TemplateGlobals {
        nav,
        backend_host,
        logged_in,
    } = build_template_globals(state, session);
    render_template(CapacityTemplate {
        nav,
        backend_host,
        logged_in,
        max_pct: MAX_UTILIZATION_PCT,
        rows,
        error,
    })
}

fn capacity_rows(utilization: &BTreeMap<String, f64>) -> Vec<CapacityRow> {
    let remaining = remaining_capacity(utilization);
    utilization
        .iter()
        .map(|(resource, used)| CapacityRow {
            resource: resource.clone(),
            used_pct: *used,
            remaining_pct: remaining.get(resource).copied().unwrap_or_default(),
        })
        .collect()
}

fn render_not_found(state: &AppState, session: &DashboardSession, path: &str) -> Response {
    let TemplateGlobals {
        nav,
        backend_host,
        logged_in,
    } = build_template_globals(state, session);
    let body = render_template(NotFoundTemplate {
        nav,
        backend_host,
        logged_in,
        path: path.to_string(),
    });
    (StatusCode::NOT_FOUND, body).into_response()
}
