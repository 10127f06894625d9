//! Login decision logic shared by the login and session endpoints.
//!
//! A login passes through four checks in order: the HTTP method (enforced by
//! the web layer), [`LoginGuard::admit`] against the rate limiter, body
//! reading (web layer again), and finally [`LoginGuard::verify`]. Keeping
//! the two guard steps separate lets the caller read the body only after the
//! attempt has been counted.

use std::time::Instant;

use super::compare::matches;
use super::identity::ClientIdentity;
use super::limiter::{LoginRateLimiter, RateLimitDecision, RateLimitPolicy};

/// Result of checking a submitted password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginDecision {
    Authenticated,
    InvalidCredentials,
    /// No admin password is configured. Never treated as "anything goes".
    Misconfigured,
}

/// Owns the login rate limiter and applies the credential check.
pub struct LoginGuard {
    limiter: LoginRateLimiter,
}

impl LoginGuard {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            limiter: LoginRateLimiter::new(policy),
        }
    }

    pub fn limiter(&self) -> &LoginRateLimiter {
        &self.limiter
    }

    /// Counts one attempt for `identity`; every attempt counts regardless of outcome.
    pub fn admit(&self, identity: &ClientIdentity, now: Instant) -> RateLimitDecision {
        let decision = self.limiter.consume(identity, now);
        if decision.limited {
            tracing::warn!("Login rate limit hit for client: {identity}");
        }
        decision
    }

    /// Checks `provided` against the configured admin password.
    ///
    /// A successful check clears the identity's rate-limit entry.
    pub fn verify(
        &self,
        identity: &ClientIdentity,
        expected: Option<&str>,
        provided: &str,
    ) -> LoginDecision {
        let Some(expected) = expected.filter(|p| !p.is_empty()) else {
            tracing::error!("Login attempted but no admin password is configured");
            return LoginDecision::Misconfigured;
        };

        if !provided.is_empty() && matches(expected, provided) {
            self.limiter.clear(identity);
            tracing::info!("Password verified successfully for client: {identity}");
            return LoginDecision::Authenticated;
        }

        tracing::warn!("Failed login attempt: invalid password for client: {identity}");
        LoginDecision::InvalidCredentials
    }
}

impl Default for LoginGuard {
    fn default() -> Self {
        Self::new(RateLimitPolicy::default())
    }
}

/// Checks a presented session cookie against the configured token.
///
/// Fails closed when either side is absent or empty.
pub fn verify_session(expected: Option<&str>, cookie: Option<&str>) -> bool {
    match (expected, cookie) {
        (Some(expected), Some(cookie)) if !expected.is_empty() => matches(expected, cookie),
        _ => false,
    }
}
