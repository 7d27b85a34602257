//! Visitor log model and DTOs.

use hostel_core::types::{DbId, Timestamp};
use hostel_core::visitor::VisitorStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `visitors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Visitor {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub visiting_student_id: DbId,
    pub visiting_student_name: String,
    pub purpose: String,
    pub check_in: Timestamp,
    /// Set exactly once, when the visit is closed.
    pub check_out: Option<Timestamp>,
    #[sqlx(try_from = "String")]
    pub status: VisitorStatus,
}

/// DTO for checking a visitor in.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVisitor {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 32, message = "phone must be 1-32 characters"))]
    pub phone: String,
    pub visiting_student_id: DbId,
    #[validate(length(min = 1, max = 200, message = "visiting_student_name must be 1-200 characters"))]
    pub visiting_student_name: Option<String>,
    #[validate(length(min = 1, max = 500, message = "purpose must be 1-500 characters"))]
    pub purpose: String,
}

/// Fully resolved visit handed to the store.
#[derive(Debug, Clone)]
pub struct NewVisitor {
    pub name: String,
    pub phone: String,
    pub visiting_student_id: DbId,
    pub visiting_student_name: String,
    pub purpose: String,
    pub check_in: Timestamp,
}
