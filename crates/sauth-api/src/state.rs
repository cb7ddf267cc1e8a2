use std::sync::Arc;

use sauth_core::services::SessionAuthService;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<SessionAuthService>,
    /// Paths reachable without a session, see [`crate::middleware::require_auth`]
    pub excluded_paths: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(auth: SessionAuthService, excluded_paths: Vec<String>) -> Self {
        Self {
            auth: Arc::new(auth),
            excluded_paths: Arc::new(excluded_paths),
        }
    }
}
