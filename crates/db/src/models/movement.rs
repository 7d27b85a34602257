//! Movement ledger entry model and DTOs.

use hostel_core::movement::MovementAction;
use hostel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the append-only `movements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movement {
    pub id: DbId,
    pub student_id: DbId,
    /// Display name captured at write time; may drift from the student record.
    pub student_name: String,
    #[sqlx(try_from = "String")]
    pub action: MovementAction,
    #[serde(rename = "timestamp")]
    pub recorded_at: Timestamp,
    pub note: Option<String>,
}

/// DTO for recording a movement.
///
/// `action` is kept as text so an unknown value is reported as a validation
/// error rather than a body rejection. When `student_name` is omitted the
/// canonical name is copied from the student record.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovement {
    pub student_id: DbId,
    #[validate(length(min = 1, max = 200, message = "student_name must be 1-200 characters"))]
    pub student_name: Option<String>,
    pub action: String,
    #[validate(length(max = 500, message = "note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// Fully resolved entry handed to the store.
#[derive(Debug, Clone)]
pub struct NewMovement {
    pub student_id: DbId,
    pub student_name: String,
    pub action: MovementAction,
    pub recorded_at: Timestamp,
    pub note: Option<String>,
}
