use std::sync::Arc;

use stockdesk_core::LoginGuard;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Owns the login rate-limit map; shared by every request in this process.
    pub login_guard: Arc<LoginGuard>,
    /// Shared client for the spreadsheet backend. Every call is single-attempt.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let login_guard = Arc::new(LoginGuard::new(config.login.policy()));
        Self {
            config: Arc::new(config),
            login_guard,
            http: reqwest::Client::new(),
        }
    }
}
