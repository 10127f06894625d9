//! stockdesk core library: transport-agnostic admin service logic.
//!
//! `stockdesk-core` holds the pieces of the inventory admin service that do
//! not depend on an HTTP framework, so the web crate stays a thin layer of
//! request plumbing around them.
//!
//! # Modules
//!
//! - [`auth`]: Login protection: constant-time comparison, the fixed-window
//!   [`LoginRateLimiter`], [`ClientIdentity`] derivation, the [`LoginGuard`]
//!   decision logic and human-readable wait descriptions.
//! - [`sale`]: Sale submission normalization and interpretation of the
//!   spreadsheet backend's response bodies.
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod auth;
pub mod error;
pub mod sale;

pub use auth::compare::matches;
pub use auth::identity::ClientIdentity;
pub use auth::limiter::{LoginRateLimiter, RateLimitDecision, RateLimitPolicy, MAX_WINDOW};
pub use auth::login::{verify_session, LoginDecision, LoginGuard};
pub use auth::wait::{describe_wait, retry_after_secs};
pub use error::{CoreError, CoreResult};
pub use sale::feed::interpret_feed_body;
pub use sale::submission::{SalePayload, SaleRequest};
pub use sale::upstream::{detect_upstream_failure, upstream_error_details};
