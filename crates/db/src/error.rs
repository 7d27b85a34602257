//! Persistence error type shared by every store backend.

/// SQLSTATE for a PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Failure reported by a store.
///
/// Unique-key collisions are surfaced as [`StoreError::UniqueViolation`]
/// carrying the constraint name (`uq_<table>_<column>`) by both backends, so
/// callers can classify them without looking at driver errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Duplicate value violates unique constraint: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    /// Whether this is a collision on the named constraint.
    pub fn is_unique_violation(&self, constraint: &str) -> bool {
        matches!(self, Self::UniqueViolation(name) if name == constraint)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                if let Some(constraint) = db_err.constraint() {
                    return Self::UniqueViolation(constraint.to_string());
                }
            }
        }
        Self::Database(err)
    }
}

/// Convenience alias for store return values.
pub type StoreResult<T> = Result<T, StoreError>;
