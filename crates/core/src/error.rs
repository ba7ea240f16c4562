use crate::types::Timestamp;

/// Domain-level error taxonomy.
///
/// `NotFound`, `Expired`, and `AuthFailed` are terminal authentication
/// outcomes; `Transient` is what a storage failure looks like after the
/// adapter's bounded retries are exhausted and is the only retryable case.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Session expired at {expired_at}")]
    Expired { expired_at: Timestamp },

    #[error("Invalid credentials")]
    AuthFailed,

    #[error("Storage unavailable: {0}")]
    Transient(String),

    #[error("Version conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of a single storage-adapter operation.
///
/// Both variants are transient. A timed-out or cancelled scan must surface
/// as `Timeout` and never be conflated with an empty result.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store operation timed out")]
    Timeout,
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Transient(err.to_string())
    }
}
