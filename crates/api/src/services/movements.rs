//! Movement Ledger: append-only check-in/check-out log.
//!
//! Each append also sets the student's presence status and `last_seen`.
//! Repeated same-action entries are allowed; the last append wins.

use chrono::Utc;
use hostel_core::movement::{self, MovementAction};
use hostel_core::roles::RecordScope;
use hostel_db::models::movement::{CreateMovement, Movement, NewMovement};
use hostel_db::Stores;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Append a movement and update the student's presence.
///
/// When `student_name` is omitted the canonical name is copied from the
/// student record; a supplied name is stored as given. If the student is
/// deleted between the append and the status write, the entry is removed
/// again and `NotFound` is returned.
pub async fn record_movement(stores: &Stores, input: &CreateMovement) -> AppResult<Movement> {
    input.validate()?;
    let action: MovementAction = input.action.parse()?;

    let student = stores
        .students
        .find_by_id(input.student_id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", input.student_id))?;

    let entry = NewMovement {
        student_id: student.id,
        student_name: input.student_name.clone().unwrap_or(student.name),
        action,
        recorded_at: Utc::now(),
        note: input.note.clone(),
    };
    let recorded = stores.movements.insert(&entry).await?;

    let status = action.resulting_status();
    if stores
        .students
        .set_presence(student.id, status, recorded.recorded_at)
        .await?
        .is_none()
    {
        if let Err(e) = stores.movements.delete(recorded.id).await {
            tracing::error!(movement_id = %recorded.id, error = %e, "Failed to remove orphaned movement");
        }
        tracing::warn!(student_id = %student.id, "Student vanished while recording movement");
        return Err(AppError::not_found("Student", student.id));
    }

    tracing::info!(
        student_id = %student.id,
        action = %action,
        status = %status,
        "Movement recorded"
    );
    Ok(recorded)
}

/// Every entry visible to the caller, newest first.
pub async fn list_movements(stores: &Stores, scope: RecordScope) -> AppResult<Vec<Movement>> {
    match scope.student_filter() {
        Some(filter) => Ok(stores.movements.list(filter, None).await?),
        None => Ok(Vec::new()),
    }
}

/// The most recent entries, newest first. `limit` defaults to 50, capped at 200.
pub async fn recent_movements(
    stores: &Stores,
    scope: RecordScope,
    limit: Option<i64>,
) -> AppResult<Vec<Movement>> {
    let limit = movement::clamp_recent_limit(limit);
    match scope.student_filter() {
        Some(filter) => Ok(stores.movements.list(filter, Some(limit)).await?),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use hostel_core::error::CoreError;
    use hostel_core::student::StudentStatus;
    use hostel_core::types::DbId;

    use super::*;
    use crate::services::test_support;

    fn movement(student_id: DbId, action: &str) -> CreateMovement {
        CreateMovement {
            student_id,
            student_name: None,
            action: action.into(),
            note: None,
        }
    }

    #[tokio::test]
    async fn status_follows_the_last_action() {
        let stores = Stores::in_memory();
        let student = test_support::student(&stores, "S1").await;
        assert_eq!(student.status, StudentStatus::Out);

        record_movement(&stores, &movement(student.id, "check_in")).await.unwrap();
        let s = stores.students.find_by_id(student.id).await.unwrap().unwrap();
        assert_eq!(s.status, StudentStatus::In);

        record_movement(&stores, &movement(student.id, "check_in")).await.unwrap();
        record_movement(&stores, &movement(student.id, "check_out")).await.unwrap();
        let s = stores.students.find_by_id(student.id).await.unwrap().unwrap();
        assert_eq!(s.status, StudentStatus::Out);
        assert!(s.last_seen >= student.last_seen);
    }

    #[tokio::test]
    async fn name_snapshot_falls_back_to_record() {
        let stores = Stores::in_memory();
        let student = test_support::student(&stores, "S1").await;

        let entry = record_movement(&stores, &movement(student.id, "check_in")).await.unwrap();
        assert_eq!(entry.student_name, student.name);

        let mut named = movement(student.id, "check_out");
        named.student_name = Some("Kiosk Name".into());
        let entry = record_movement(&stores, &named).await.unwrap();
        assert_eq!(entry.student_name, "Kiosk Name");
    }

    #[tokio::test]
    async fn unknown_student_or_action_is_rejected() {
        let stores = Stores::in_memory();
        let student = test_support::student(&stores, "S1").await;

        assert_matches!(
            record_movement(&stores, &movement(uuid::Uuid::new_v4(), "check_in")).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
        assert_matches!(
            record_movement(&stores, &movement(student.id, "teleport")).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert!(list_movements(&stores, RecordScope::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_is_clamped_and_newest_first() {
        let stores = Stores::in_memory();
        let student = test_support::student(&stores, "S1").await;
        for i in 0..5 {
            let action = if i % 2 == 0 { "check_in" } else { "check_out" };
            record_movement(&stores, &movement(student.id, action)).await.unwrap();
        }

        let recent = recent_movements(&stores, RecordScope::All, Some(2)).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].recorded_at >= recent[1].recorded_at);

        let at_least_one = recent_movements(&stores, RecordScope::All, Some(0)).await.unwrap();
        assert_eq!(at_least_one.len(), 1);
    }
}
