use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::DashboardSession;
use crate::routes::RouteTable;
use crate::shell::SessionShell;

#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub shell: SessionShell,
    /// Per-browser view state keyed by the `session_id` cookie.
    pub sessions: Arc<Mutex<HashMap<String, DashboardSession>>>,
    pub custom_css: Option<String>,
}

impl AppState {
    pub fn new(routes: RouteTable, shell: SessionShell) -> Self {
        Self {
            routes: Arc::new(routes),
            shell,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            custom_css: None,
        }
    }
}
