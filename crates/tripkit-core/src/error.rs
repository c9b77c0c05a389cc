use thiserror::Error;

/// Error taxonomy for store mutations. Every failure is local and
/// recoverable; a rejected operation leaves the store unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed or out-of-range input to a CRUD operation.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Reference to a nonexistent trip, member, or collection entry.
    #[error("Not found: {0}")]
    NotFound(String),
    /// Member rename collided with an existing name.
    #[error("Duplicate member: {0}")]
    DuplicateMember(String),
    /// The operation would break a store invariant (e.g. deleting the last
    /// remaining trip).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    /// Persistence-layer failure surfaced through the storage trait.
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
