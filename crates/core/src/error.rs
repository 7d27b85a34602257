use crate::types::DbId;

/// Domain error taxonomy shared by every component.
///
/// Each variant maps to exactly one HTTP status in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Room {room_number} is full ({capacity} of {capacity} places taken)")]
    CapacityExceeded { room_number: String, capacity: i32 },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
