//! Student entity model and DTOs.

use hostel_core::student::StudentStatus;
use hostel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `students` table.
///
/// `room_id`/`room_number` and `status` are never written by the generic
/// update path: the room reference changes only through allocation and the
/// status only through the movement ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Institution-issued student code (unique).
    pub student_id: String,
    pub room_id: Option<DbId>,
    /// Snapshot of the assigned room's number, for display.
    pub room_number: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: StudentStatus,
    pub created_at: Timestamp,
    pub last_seen: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new student.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudent {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, max = 32, message = "phone must be 1-32 characters"))]
    pub phone: String,
    #[validate(length(min = 1, max = 64, message = "student_id must be 1-64 characters"))]
    pub student_id: String,
}

/// DTO for updating a student's profile. All fields are optional.
///
/// Unknown fields are rejected so that attempts to write `status` or
/// `room_number` fail loudly instead of being silently dropped.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateStudent {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 32, message = "phone must be 1-32 characters"))]
    pub phone: Option<String>,
}

impl UpdateStudent {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Room reference written onto a student by allocation.
#[derive(Debug, Clone)]
pub struct RoomAssignment {
    pub room_id: DbId,
    pub room_number: String,
}

/// Presence counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct PresenceCounts {
    pub total: i64,
    pub students_in: i64,
    pub students_out: i64,
}
