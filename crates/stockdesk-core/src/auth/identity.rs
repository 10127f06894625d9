//! Heuristic client identity used to bucket login attempts.

use std::fmt;
use std::net::SocketAddr;

const DELIMITER: char = '|';
const UNKNOWN_ADDRESS: &str = "unknown";

/// A rate-limit bucket key derived from request metadata.
///
/// Combines the client address with the `User-Agent` and `Sec-CH-UA`
/// headers. Not unique and not a security boundary on its own: it only
/// keeps one noisy client from spending another's attempts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    /// Builds an identity from raw header values.
    ///
    /// The address is the first comma-separated entry of `forwarded_for`
    /// (trimmed), else the transport peer address, else `unknown`.
    pub fn from_parts(
        forwarded_for: Option<&str>,
        peer: Option<SocketAddr>,
        user_agent: Option<&str>,
        client_hint: Option<&str>,
    ) -> Self {
        let address = forwarded_for
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());

        Self(format!(
            "{address}{DELIMITER}{}{DELIMITER}{}",
            user_agent.unwrap_or_default(),
            client_hint.unwrap_or_default()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
