//! Student Directory.
//!
//! Presence status and the room reference are not writable here: status moves
//! only through the movement ledger and the room reference only through room
//! allocation.

use hostel_core::error::CoreError;
use hostel_core::roles::RecordScope;
use hostel_core::types::DbId;
use hostel_db::models::student::{CreateStudent, Student, UpdateStudent};
use hostel_db::store::UQ_STUDENT_CODE;
use hostel_db::{StoreError, Stores};
use validator::Validate;

use super::rooms::release_reserved;
use crate::error::{AppError, AppResult};

pub async fn create_student(stores: &Stores, input: &CreateStudent) -> AppResult<Student> {
    input.validate()?;

    let student = stores.students.insert(input).await.map_err(|err| match err {
        StoreError::UniqueViolation(ref c) if c == UQ_STUDENT_CODE => AppError::Core(
            CoreError::Conflict(format!("Student with student_id {} already exists", input.student_id)),
        ),
        other => other.into(),
    })?;

    tracing::info!(student_id = %student.id, code = %student.student_id, "Student created");
    Ok(student)
}

/// Fetch one student, subject to the caller's record scope.
pub async fn get_student(stores: &Stores, scope: RecordScope, id: DbId) -> AppResult<Student> {
    if !scope.permits(id) {
        return Err(AppError::forbidden("You may only view your own student record"));
    }
    stores
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", id))
}

/// Newest first, limited to what the caller may see.
pub async fn list_students(stores: &Stores, scope: RecordScope) -> AppResult<Vec<Student>> {
    match scope.student_filter() {
        Some(filter) => Ok(stores.students.list(filter).await?),
        None => Ok(Vec::new()),
    }
}

/// Apply a profile patch. Only `name`, `email` and `phone` are accepted.
pub async fn update_student(stores: &Stores, id: DbId, input: &UpdateStudent) -> AppResult<Student> {
    if input.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }
    input.validate()?;

    let student = stores
        .students
        .update_profile(id, input)
        .await?
        .ok_or_else(|| AppError::not_found("Student", id))?;

    tracing::info!(student_id = %id, "Student updated");
    Ok(student)
}

/// Delete a student, giving back their room place if they held one.
///
/// Ledger rows referencing the student are kept.
pub async fn delete_student(stores: &Stores, id: DbId) -> AppResult<()> {
    let removed = stores
        .students
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", id))?;

    if let Some(room_id) = removed.room_id {
        release_reserved(stores, room_id).await;
    }

    tracing::info!(student_id = %id, room_id = ?removed.room_id, "Student deleted");
    Ok(())
}
