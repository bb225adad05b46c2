use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use yansi::Paint;

use super::error::ShellError;
use super::state::{Credentials, Overview, SessionState};

/// Message shown when the login endpoint rejects the credentials.
pub const LOGIN_FAILED: &str = "Login failed";

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Print the request as an equivalent curl command. The password is masked.
fn log_request(method: &str, url: &str, body: Option<&Value>) {
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)));

    if let Some(d) = body {
        let mut masked = d.clone();
        if let Some(pw) = masked.get_mut("password") {
            *pw = Value::from("***");
        }
        let json_str = serde_json::to_string(&masked).unwrap_or_default();
        parts.push(format!(
            "{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
        ));
        parts.push(format!(
            "{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", json_str.replace('\'', "'\\''"))).fg(yansi::Color::White)
        ));
    }
    log_output(format!("Request:\n{}", parts.join(" ")));
}

fn log_response(status: reqwest::StatusCode, text: &str) {
    let line = format!("HTTP {}: {}", status, text);
    let painted = if status.is_success() {
        // Grayed out so request lines stand out
        Paint::new(line).rgb(100, 100, 100).to_string()
    } else {
        Paint::new(line).fg(yansi::Color::Red).to_string()
    };
    log_output(format!("Response:\n{}", painted));
}

/// Drives the login and overview calls against the report API.
#[derive(Clone, Debug)]
pub struct SessionShell {
    client: reqwest::Client,
    backend_url: String,
}

impl SessionShell {
    pub fn new(client: reqwest::Client, backend_url: &str) -> Self {
        Self {
            client,
            backend_url: backend_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// Authenticate with `credentials`, then load the overview.
    ///
    /// Any earlier login is dropped first. A rejected or failed login leaves `state.logged_in` false and puts the
    /// error text in `state.message`. Once the login endpoint accepts, the flag
    /// stays true even if the overview request fails afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Authentication` when the login endpoint answers
    /// non-2xx or cannot be reached, and `ShellError::Overview` when the
    /// follow-up overview request fails.
    pub async fn login(
        &self,
        state: &mut SessionState,
        credentials: Credentials,
    ) -> Result<(), ShellError> {
        state.logged_in = false;
        state.overview = None;
        state.credentials = credentials;
        if let Err(e) = self.authenticate(&state.credentials).await {
            tracing::warn!(server = %state.credentials.server, error = %e, "Login rejected");
            state.message = e.to_string();
            return Err(e);
        }
        tracing::info!(server = %state.credentials.server, username = %state.credentials.username, "Logged in");
        state.logged_in = true;
        state.message.clear();
        self.load_overview(state).await
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<(), ShellError> {
        let url = format!("{}/login", self.backend_url);
        let body = serde_json::json!({
            "server": credentials.server,
            "username": credentials.username,
            "password": credentials.password,
        });
        log_request("POST", &url, Some(&body));

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ShellError::Authentication(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        log_response(status, &text);
        if !status.is_success() {
            return Err(ShellError::Authentication(LOGIN_FAILED.to_string()));
        }
        Ok(())
    }

    /// Fetch the overview payload and store it verbatim.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Overview` on network failure, a non-2xx status or
    /// a body that is not JSON. The error text is also put in `state.message`.
    pub async fn load_overview(&self, state: &mut SessionState) -> Result<(), ShellError> {
        match self.fetch_overview().await {
            Ok(overview) => {
                state.overview = Some(overview);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Overview request failed");
                state.message = e.to_string();
                Err(e)
            }
        }
    }

    async fn fetch_overview(&self) -> Result<Overview, ShellError> {
        let url = format!("{}/overview", self.backend_url);
        log_request("GET", &url, None);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShellError::Overview(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ShellError::Overview(e.to_string()))?;
        log_response(status, &text);
        if !status.is_success() {
            return Err(ShellError::Overview(format!("HTTP {}", status)));
        }
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| ShellError::Overview(format!("invalid JSON: {}", e)))?;
        Ok(Overview(value))
    }

    /// Drop the session and return to the login view.
    pub fn logout(&self, state: &mut SessionState) {
        tracing::info!(server = %state.credentials.server, "Logged out");
        *state = SessionState::default();
    }
}
