//! Login protection for the admin service.
//!
//! [`compare`] holds the constant-time secret comparison, [`limiter`] the
//! per-client fixed-window attempt counter, [`identity`] the heuristic client
//! key, [`login`] the decision logic that composes them and [`wait`] the
//! human-readable retry description shown to throttled clients.

pub mod compare;
pub mod identity;
pub mod limiter;
pub mod login;
pub mod wait;
