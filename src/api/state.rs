use std::sync::{Arc, Mutex, PoisonError};

use crate::vcenter::{VcenterClient, VcenterSession};

#[derive(Clone)]
pub struct ApiState {
    pub vcenter: VcenterClient,
    /// Server used when a login request leaves `server` empty.
    pub default_server: Option<String>,
    /// The one vCenter session shared by every caller of this process.
    pub session: Arc<Mutex<Option<VcenterSession>>>,
}

impl ApiState {
    pub fn new(vcenter: VcenterClient, default_server: Option<String>) -> Self {
        Self {
            vcenter,
            default_server,
            session: Arc::new(Mutex::new(None)),
        }
    }

    pub fn current_session(&self) -> Option<VcenterSession> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn store_session(&self, session: VcenterSession) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }
}
