//! Minimal vCenter REST client: session creation and inventory listings.

use serde_json::Value;
use thiserror::Error;

/// Header carrying the session token on authenticated vCenter requests.
pub const SESSION_HEADER: &str = "vmware-api-session-id";

#[derive(Debug, Error)]
pub enum VcenterError {
    #[error("Network error: {0}")]
    Network(String),

    /// vCenter answered with an unexpected status
    #[error("vCenter returned HTTP {0}")]
    Rejected(u16),

    #[error("Unexpected vCenter response: {0}")]
    Decode(String),
}

/// An authenticated vCenter session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcenterSession {
    pub server: String,
    pub token: String,
}

/// Inventory collections listed for the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inventory {
    Cluster,
    Host,
    Vm,
    Datastore,
}

impl Inventory {
    pub fn path(&self) -> &'static str {
        match self {
            Inventory::Cluster => "/rest/vcenter/cluster",
            Inventory::Host => "/rest/vcenter/host",
            Inventory::Vm => "/rest/vcenter/vm",
            Inventory::Datastore => "/rest/vcenter/datastore",
        }
    }
}

/// HTTP client for talking to vCenter appliances.
///
/// Appliances usually present self-signed certificates, so certificate
/// verification is off for this client only.
pub fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(format!("vreport/{}", env!("CARGO_PKG_VERSION")))
        .danger_accept_invalid_certs(true)
        .build()
}

#[derive(Debug, Clone)]
pub struct VcenterClient {
    client: reqwest::Client,
    scheme: String,
}

impl VcenterClient {
    pub fn new(client: reqwest::Client, scheme: &str) -> Self {
        Self {
            client,
            scheme: scheme.to_string(),
        }
    }

    fn url(&self, server: &str, path: &str) -> String {
        format!("{}://{}{}", self.scheme, server.trim().trim_end_matches('/'), path)
    }

    /// Open a session with basic auth and return its token.
    pub async fn create_session(
        &self,
        server: &str,
        username: &str,
        password: &str,
    ) -> Result<VcenterSession, VcenterError> {
        let url = self.url(server, "/rest/com/vmware/cis/session");
        tracing::info!(%url, username, "Creating vCenter session");
        let response = self
            .client
            .post(&url)
            .basic_auth(username, Some(password))
            .send()
            .await
            .map_err(|e| VcenterError::Network(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(VcenterError::Rejected(status.as_u16()));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|e| VcenterError::Decode(e.to_string()))?;
        let token = body
            .get("value")
            .and_then(|v| v.as_str())
            .ok_or_else(|| VcenterError::Decode("missing session value".into()))?;
        Ok(VcenterSession {
            server: server.trim().to_string(),
            token: token.to_string(),
        })
    }

    /// List one inventory collection; vCenter wraps it in a `value` array.
    pub async fn list(
        &self,
        session: &VcenterSession,
        inventory: Inventory,
    ) -> Result<Vec<Value>, VcenterError> {
        let url = self.url(&session.server, inventory.path());
        let response = self
            .client
            .get(&url)
            .header(SESSION_HEADER, &session.token)
            .send()
            .await
            .map_err(|e| VcenterError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VcenterError::Rejected(status.as_u16()));
        }
        let mut body: Value = response
            .json()
            .await
            .map_err(|e| VcenterError::Decode(e.to_string()))?;
        match body.get_mut("value").map(Value::take) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(VcenterError::Decode(format!(
                "{} did not return a value array",
                inventory.path()
            ))),
        }
    }

    pub async fn list_clusters(&self, session: &VcenterSession) -> Result<Vec<Value>, VcenterError> {
        self.list(session, Inventory::Cluster).await
    }

    pub async fn list_hosts(&self, session: &VcenterSession) -> Result<Vec<Value>, VcenterError> {
        self.list(session, Inventory::Host).await
    }

    pub async fn list_vms(&self, session: &VcenterSession) -> Result<Vec<Value>, VcenterError> {
        self.list(session, Inventory::Vm).await
    }

    pub async fn list_datastores(&self, session: &VcenterSession) -> Result<Vec<Value>, VcenterError> {
        self.list(session, Inventory::Datastore).await
    }
}
