//! Maintenance ticket model and DTOs.

use hostel_core::maintenance::TicketStatus;
use hostel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `maintenance_tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceTicket {
    pub id: DbId,
    pub student_id: DbId,
    pub student_name: String,
    pub room_number: String,
    pub issue_type: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: TicketStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening a ticket.
///
/// `student_name` and `room_number` fall back to the student record when
/// omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTicket {
    pub student_id: DbId,
    #[validate(length(min = 1, max = 200, message = "student_name must be 1-200 characters"))]
    pub student_name: Option<String>,
    #[validate(length(min = 1, max = 32, message = "room_number must be 1-32 characters"))]
    pub room_number: Option<String>,
    #[validate(length(min = 1, max = 100, message = "issue_type must be 1-100 characters"))]
    pub issue_type: String,
    #[validate(length(min = 1, max = 2000, message = "description must be 1-2000 characters"))]
    pub description: String,
}

/// Body of `PUT /maintenance/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTicketStatus {
    pub status: String,
}

/// Fully resolved ticket handed to the store.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub student_id: DbId,
    pub student_name: String,
    pub room_number: String,
    pub issue_type: String,
    pub description: String,
    pub created_at: Timestamp,
}
