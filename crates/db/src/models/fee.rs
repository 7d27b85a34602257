//! Fee record model and DTOs.

use hostel_core::fee::FeeStatus;
use hostel_core::types::{flexible_timestamp, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `fee_records` table.
///
/// `status` may still read `pending` for a past-due record until a sweep or
/// refresh persists `overdue`; overdue listings classify by date.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeeRecord {
    pub id: DbId,
    pub student_id: DbId,
    pub student_name: String,
    pub fee_type: String,
    pub amount: f64,
    pub due_date: Timestamp,
    #[sqlx(try_from = "String")]
    pub status: FeeStatus,
    pub paid_date: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for raising a fee.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFee {
    pub student_id: DbId,
    #[validate(length(min = 1, max = 200, message = "student_name must be 1-200 characters"))]
    pub student_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "fee_type must be 1-100 characters"))]
    pub fee_type: String,
    pub amount: f64,
    #[serde(deserialize_with = "flexible_timestamp::deserialize")]
    pub due_date: Timestamp,
}

/// Fully resolved fee handed to the store.
#[derive(Debug, Clone)]
pub struct NewFee {
    pub student_id: DbId,
    pub student_name: String,
    pub fee_type: String,
    pub amount: f64,
    pub due_date: Timestamp,
    pub created_at: Timestamp,
}
