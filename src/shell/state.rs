use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login form inputs. The password never leaves the process in serialized state.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub server: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl Credentials {
    pub fn new(server: &str, username: &str, password: &str) -> Self {
        Self {
            server: server.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Opaque JSON summary returned by the report API. No structure is assumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overview(pub Value);

impl Overview {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Pretty-printed JSON, as shown in the overview panel.
    pub fn render(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl From<Value> for Overview {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Everything one view of the dashboard displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub credentials: Credentials,
    /// Set once a login succeeds; only `logout` clears it.
    pub logged_in: bool,
    pub message: String,
    pub overview: Option<Overview>,
}

impl SessionState {
    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }

    /// True while the credential form should be displayed.
    pub fn shows_login_form(&self) -> bool {
        !self.logged_in
    }
}
