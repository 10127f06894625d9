use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    /// Kept loose so a non-string password reads as empty instead of failing the request.
    #[serde(default)]
    pub password: Option<serde_json::Value>,
}

impl LoginRequest {
    /// Parses a login body. Malformed JSON is logged and treated as no password.
    pub fn from_body(raw: &[u8]) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        serde_json::from_slice(raw).unwrap_or_else(|_| {
            tracing::warn!("Invalid JSON received on login");
            Self::default()
        })
    }

    pub fn password(&self) -> &str {
        self.password
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SaleSubmitResponse {
    Data {
        success: bool,
        data: serde_json::Value,
    },
    Message {
        success: bool,
        message: String,
    },
}
