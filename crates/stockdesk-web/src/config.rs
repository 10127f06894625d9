use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use stockdesk_core::{RateLimitPolicy, MAX_WINDOW};

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub tls: TlsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Shared admin password checked by the login endpoint.
    #[serde(default)]
    pub admin_password: Option<String>,
    /// Opaque session token issued as the `auth` cookie and accepted as a bearer token.
    #[serde(default)]
    pub session_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub inventory_url: Option<String>,
    #[serde(default)]
    pub purchases_url: Option<String>,
    #[serde(default)]
    pub statement_url: Option<String>,
    #[serde(default)]
    pub sales_feed_url: Option<String>,
    #[serde(default)]
    pub sales_submit_url: Option<String>,
    #[serde(default)]
    pub sales_submit_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_max_attempts() -> u32 { 5 }
fn default_window_secs() -> u64 { 300 }
fn default_max_body_bytes() -> usize { 1024 }

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            window_secs: default_window_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            auth: AuthConfig::default(),
            login: LoginConfig::default(),
            upstream: UpstreamConfig::default(),
            tls: TlsConfig::default(),
        }
    }
}

impl LoginConfig {
    pub fn policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            max_attempts: self.max_attempts,
            window: Duration::from_secs(self.window_secs),
        }
    }
}

impl ServerConfig {
    pub fn admin_password(&self) -> Option<&str> {
        non_empty(self.auth.admin_password.as_deref())
    }

    pub fn session_token(&self) -> Option<&str> {
        non_empty(self.auth.session_token.as_deref())
    }

    pub fn tls_enabled(&self) -> bool {
        self.tls.cert_path.is_some() && self.tls.key_path.is_some()
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("STOCKDESK_CONFIG").map(PathBuf::from).ok();

        let mut config = if let Some(path) = config_path {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            ServerConfig::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.resolve_fallbacks();
        config.validate()?;
        config.warn_on_weak_settings();
        Ok(config)
    }

    /// Applies environment overrides through `lookup`.
    ///
    /// Values with several names (kept from older deployments) take the first
    /// non-empty one. Empty values never override.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(*key))
                .find(|v| !v.trim().is_empty())
        };

        if let Some(password) = first(&["ADMIN_PASSWORD"]) {
            self.auth.admin_password = Some(password);
        }
        if let Some(token) = first(&["AUTH_TOKEN"]) {
            self.auth.session_token = Some(token);
        }

        if let Some(url) = first(&["GOOGLE_SHEET_URL"]) {
            self.upstream.inventory_url = Some(url);
        }
        if let Some(url) = first(&["purchase_sheet"]) {
            self.upstream.purchases_url = Some(url);
        }
        if let Some(url) = first(&["google_sheet_statement"]) {
            self.upstream.statement_url = Some(url);
        }
        if let Some(url) = first(&["SALES_FEED_URL", "SALES_SHEET_URL", "sales_sheet"]) {
            self.upstream.sales_feed_url = Some(url);
        }
        if let Some(url) = first(&["SALES_SUBMIT_URL", "SELL_API_URL"]) {
            self.upstream.sales_submit_url = Some(url);
        }
        if let Some(token) = first(&["SALES_SUBMIT_TOKEN", "SELL_API_TOKEN"]) {
            self.upstream.sales_submit_token = Some(token);
        }

        if let Some(addr) = first(&["STOCKDESK_BIND_ADDR"]) {
            self.bind_addr = addr.parse()?;
        }
        if let Some(cert) = first(&["STOCKDESK_TLS_CERT"]) {
            self.tls.cert_path = Some(cert);
        }
        if let Some(key) = first(&["STOCKDESK_TLS_KEY"]) {
            self.tls.key_path = Some(key);
        }

        Ok(())
    }

    /// Fills settings that default to another one once file and environment are merged.
    ///
    /// The sales feed falls back to the inventory sheet, whichever source set it.
    pub fn resolve_fallbacks(&mut self) {
        if non_empty(self.upstream.sales_feed_url.as_deref()).is_none() {
            self.upstream.sales_feed_url = self.upstream.inventory_url.clone();
        }
    }

    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.login.window_secs > MAX_WINDOW.as_secs() {
            anyhow::bail!(
                "login.window_secs is {} but may be at most {}",
                self.login.window_secs,
                MAX_WINDOW.as_secs()
            );
        }
        Ok(())
    }

    // Missing secrets are not fatal: the affected endpoints fail closed instead.
    fn warn_on_weak_settings(&self) {
        if self.admin_password().is_none() {
            tracing::warn!("ADMIN_PASSWORD is not set. Every login will be rejected as misconfigured.");
        }
        match self.session_token() {
            None => tracing::warn!(
                "AUTH_TOKEN is not set. Session checks and data endpoints will fail closed."
            ),
            Some(token) if token.len() < 32 => tracing::warn!(
                "AUTH_TOKEN is shorter than 32 characters. Consider using a stronger token."
            ),
            Some(_) => {}
        }
        if self.login.max_attempts == 0 {
            tracing::warn!("login.max_attempts is 0. Every login attempt will be rate limited.");
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
