//! Fixed-window login attempt counter.

use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::identity::ClientIdentity;

/// Longest window a policy may use. Longer windows are clamped to this.
pub const MAX_WINDOW: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Attempt ceiling and window length for [`LoginRateLimiter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_attempts: u32,
    pub window: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(5 * 60),
        }
    }
}

/// Outcome of [`LoginRateLimiter::consume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub limited: bool,
    /// Time until the current window closes.
    pub retry_after: Duration,
}

#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    count: u32,
    reset_at: Instant,
}

/// Per-identity fixed-window counter.
///
/// Each identity owns at most one entry. Its count grows with every attempt
/// inside the window and restarts at 1 once the window has elapsed. Bursts
/// straddling a window boundary can reach twice the ceiling.
pub struct LoginRateLimiter {
    entries: DashMap<ClientIdentity, RateLimitEntry>,
    policy: RateLimitPolicy,
}

impl LoginRateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        if policy.window > MAX_WINDOW {
            tracing::warn!(
                "Rate limit window {:?} exceeds {:?}; clamping",
                policy.window,
                MAX_WINDOW
            );
        }
        Self {
            entries: DashMap::new(),
            policy: RateLimitPolicy {
                window: policy.window.min(MAX_WINDOW),
                ..policy
            },
        }
    }

    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Records one attempt for `identity` at `now`.
    pub fn consume(&self, identity: &ClientIdentity, now: Instant) -> RateLimitDecision {
        let window = self.policy.window;

        match self.entries.entry(identity.clone()) {
            Entry::Vacant(vacant) => {
                vacant.insert(RateLimitEntry {
                    count: 1,
                    reset_at: window_end(now, window),
                });
                RateLimitDecision {
                    limited: false,
                    retry_after: window,
                }
            }
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.reset_at <= now {
                    *entry = RateLimitEntry {
                        count: 1,
                        reset_at: window_end(now, window),
                    };
                    return RateLimitDecision {
                        limited: false,
                        retry_after: window,
                    };
                }

                entry.count = entry.count.saturating_add(1);
                let retry_after = entry.reset_at.saturating_duration_since(now);
                let limited = entry.count > self.policy.max_attempts;
                if limited {
                    tracing::debug!(
                        "Login attempts exhausted: count={}, retry_after={:?}",
                        entry.count,
                        retry_after
                    );
                }
                RateLimitDecision {
                    limited,
                    retry_after,
                }
            }
        }
    }

    /// Forgets `identity`, so its next attempt opens a fresh window.
    pub fn clear(&self, identity: &ClientIdentity) {
        self.entries.remove(identity);
    }

    /// Drops entries whose window has already closed.
    pub fn cleanup_expired(&self, now: Instant) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.reset_at > now);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::debug!("Rate limit cleanup removed {removed} expired entries");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitPolicy::default())
    }
}

// `Instant` has no maximum, so an end that cannot be represented falls back
// to the clamp and then to `now`, which only shortens the window.
fn window_end(now: Instant, window: Duration) -> Instant {
    now.checked_add(window)
        .or_else(|| now.checked_add(MAX_WINDOW))
        .unwrap_or(now)
}
