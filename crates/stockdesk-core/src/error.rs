//! Error types for `stockdesk-core`.
//!
//! Fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

/// Unified error type for all core operations.
///
/// The display strings double as the client-facing messages, so keep them
/// short and free of internal detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A sale submission lacked `sku`, `employee` or `price`.
    #[error("Missing required fields: sku, employee, price")]
    MissingSaleFields,

    /// The submitted price could not be read as a finite number.
    #[error("Price must be a number")]
    InvalidPrice,
}

/// Convenience alias used throughout `stockdesk-core`.
pub type CoreResult<T> = Result<T, CoreError>;
