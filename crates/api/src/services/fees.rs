//! Fee Ledger.
//!
//! Overdue is classified at query time: unpaid and due strictly before now.
//! Listing never writes. [`refresh_overdue`] persists `pending -> overdue`
//! and is run by the background sweep and the warden refresh endpoint.

use chrono::Utc;
use hostel_core::fee;
use hostel_core::roles::RecordScope;
use hostel_core::types::{DbId, Timestamp};
use hostel_db::models::fee::{CreateFee, FeeRecord, NewFee};
use hostel_db::Stores;
use validator::Validate;

use crate::error::{AppError, AppResult};

pub async fn create_fee(stores: &Stores, input: &CreateFee) -> AppResult<FeeRecord> {
    input.validate()?;
    fee::validate_amount(input.amount)?;

    let student = stores
        .students
        .find_by_id(input.student_id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", input.student_id))?;

    let record = NewFee {
        student_id: student.id,
        student_name: input.student_name.clone().unwrap_or(student.name),
        fee_type: input.fee_type.clone(),
        amount: input.amount,
        due_date: input.due_date,
        created_at: Utc::now(),
    };
    let created = stores.fees.insert(&record).await?;

    tracing::info!(fee_id = %created.id, student_id = %student.id, amount = created.amount, "Fee recorded");
    Ok(created)
}

pub async fn list_fees(stores: &Stores, scope: RecordScope) -> AppResult<Vec<FeeRecord>> {
    match scope.student_filter() {
        Some(filter) => Ok(stores.fees.list(filter).await?),
        None => Ok(Vec::new()),
    }
}

/// Unpaid fees due before `now`, earliest first.
pub async fn list_overdue(stores: &Stores, scope: RecordScope, now: Timestamp) -> AppResult<Vec<FeeRecord>> {
    match scope.student_filter() {
        Some(filter) => Ok(stores.fees.list_overdue(now, filter).await?),
        None => Ok(Vec::new()),
    }
}

/// Mark a fee paid. Paying twice fails with `InvalidState`.
pub async fn pay(stores: &Stores, id: DbId) -> AppResult<FeeRecord> {
    if let Some(paid) = stores.fees.mark_paid(id, Utc::now()).await? {
        tracing::info!(fee_id = %id, amount = paid.amount, "Fee paid");
        return Ok(paid);
    }

    let current = stores
        .fees
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("FeeRecord", id))?;
    fee::ensure_payable(current.status)?;
    Err(AppError::InternalError(format!("Fee {id} payment was rejected by the store")))
}

/// Persist `overdue` on every pending fee due before `now`. Returns the count.
pub async fn refresh_overdue(stores: &Stores, now: Timestamp) -> AppResult<u64> {
    let marked = stores.fees.mark_overdue(now).await?;
    if marked > 0 {
        tracing::info!(marked, "Overdue fees marked");
    }
    Ok(marked)
}
