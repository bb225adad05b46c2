use std::sync::Arc;

use crate::routes::{Navigator, RouteTable};
use crate::shell::SessionState;

/// What one browser sees: the shell state and the page it is on.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    pub state: SessionState,
    pub navigator: Navigator,
    /// Bumped by every login attempt; a finished login only lands on a match.
    pub login_attempt: u64,
}

impl DashboardSession {
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self {
            state: SessionState::default(),
            navigator: Navigator::new(routes),
            login_attempt: 0,
        }
    }
}
