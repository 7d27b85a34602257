//! Visitor Log.

use chrono::Utc;
use hostel_core::roles::RecordScope;
use hostel_core::types::DbId;
use hostel_core::visitor;
use hostel_db::models::visitor::{CreateVisitor, NewVisitor, Visitor};
use hostel_db::Stores;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Open a visit for an existing host student.
pub async fn check_in(stores: &Stores, input: &CreateVisitor) -> AppResult<Visitor> {
    input.validate()?;

    let host = stores
        .students
        .find_by_id(input.visiting_student_id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", input.visiting_student_id))?;

    let visit = NewVisitor {
        name: input.name.clone(),
        phone: input.phone.clone(),
        visiting_student_id: host.id,
        visiting_student_name: input.visiting_student_name.clone().unwrap_or(host.name),
        purpose: input.purpose.clone(),
        check_in: Utc::now(),
    };
    let visitor = stores.visitors.insert(&visit).await?;

    tracing::info!(visitor_id = %visitor.id, host_id = %host.id, "Visitor checked in");
    Ok(visitor)
}

/// Close a visit. A visit can be closed only once.
pub async fn check_out(stores: &Stores, id: DbId) -> AppResult<Visitor> {
    if let Some(closed) = stores.visitors.check_out(id, Utc::now()).await? {
        tracing::info!(visitor_id = %id, "Visitor checked out");
        return Ok(closed);
    }

    let current = stores
        .visitors
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Visitor", id))?;
    visitor::ensure_can_check_out(current.status)?;
    Err(AppError::InternalError(format!(
        "Visitor {id} check-out was rejected by the store"
    )))
}

/// All visits for hosts the caller may see, newest check-in first.
pub async fn list_visitors(stores: &Stores, scope: RecordScope) -> AppResult<Vec<Visitor>> {
    match scope.student_filter() {
        Some(host) => Ok(stores.visitors.list(host, false).await?),
        None => Ok(Vec::new()),
    }
}

/// Visits still checked in.
pub async fn list_active(stores: &Stores, scope: RecordScope) -> AppResult<Vec<Visitor>> {
    match scope.student_filter() {
        Some(host) => Ok(stores.visitors.list(host, true).await?),
        None => Ok(Vec::new()),
    }
}
