//! Maintenance Tickets.
//!
//! Status changes are permissive: any status may be set from any other.

use chrono::Utc;
use hostel_core::maintenance::TicketStatus;
use hostel_core::roles::RecordScope;
use hostel_core::types::DbId;
use hostel_db::models::maintenance::{CreateTicket, MaintenanceTicket, NewTicket};
use hostel_db::Stores;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Open a ticket. Students may open tickets only for their own record.
///
/// Missing `student_name` / `room_number` are filled from the student record;
/// a student with no room and no explicit room number is rejected.
pub async fn create_ticket(
    stores: &Stores,
    scope: RecordScope,
    input: &CreateTicket,
) -> AppResult<MaintenanceTicket> {
    input.validate()?;
    if !scope.permits(input.student_id) {
        return Err(AppError::forbidden(
            "Students may only open maintenance tickets for themselves",
        ));
    }

    let student = stores
        .students
        .find_by_id(input.student_id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", input.student_id))?;

    let room_number = input
        .room_number
        .clone()
        .or(student.room_number)
        .ok_or_else(|| AppError::validation("room_number is required for a student without a room"))?;

    let ticket = NewTicket {
        student_id: student.id,
        student_name: input.student_name.clone().unwrap_or(student.name),
        room_number,
        issue_type: input.issue_type.clone(),
        description: input.description.clone(),
        created_at: Utc::now(),
    };
    let created = stores.maintenance.insert(&ticket).await?;

    tracing::info!(ticket_id = %created.id, student_id = %student.id, issue = %created.issue_type, "Maintenance ticket opened");
    Ok(created)
}

pub async fn list_tickets(stores: &Stores, scope: RecordScope) -> AppResult<Vec<MaintenanceTicket>> {
    match scope.student_filter() {
        Some(filter) => Ok(stores.maintenance.list(filter).await?),
        None => Ok(Vec::new()),
    }
}

/// Set a ticket's status. Unknown status text is a validation error.
pub async fn update_status(stores: &Stores, id: DbId, status: &str) -> AppResult<MaintenanceTicket> {
    let status: TicketStatus = status.parse()?;
    let ticket = stores
        .maintenance
        .set_status(id, status, Utc::now())
        .await?
        .ok_or_else(|| AppError::not_found("MaintenanceTicket", id))?;

    tracing::info!(ticket_id = %id, status = %status, "Maintenance ticket status changed");
    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use hostel_core::error::CoreError;

    use super::*;
    use crate::services::{rooms, test_support};

    fn ticket(student_id: DbId) -> CreateTicket {
        CreateTicket {
            student_id,
            student_name: None,
            room_number: None,
            issue_type: "plumbing".into(),
            description: "Leaking tap".into(),
        }
    }

    #[tokio::test]
    async fn ticket_snapshots_student_details() {
        let stores = Stores::in_memory();
        let room = test_support::room(&stores, "204", 2).await;
        let student = test_support::student(&stores, "S1").await;
        rooms::allocate(&stores, room.id, student.id).await.unwrap();

        let created = create_ticket(&stores, RecordScope::All, &ticket(student.id)).await.unwrap();
        assert_eq!(created.status, TicketStatus::Pending);
        assert_eq!(created.room_number, "204");
        assert_eq!(created.student_name, student.name);
    }

    #[tokio::test]
    async fn student_without_room_needs_explicit_room_number() {
        let stores = Stores::in_memory();
        let student = test_support::student(&stores, "S1").await;
        assert_matches!(
            create_ticket(&stores, RecordScope::All, &ticket(student.id)).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );

        let mut explicit = ticket(student.id);
        explicit.room_number = Some("Common room".into());
        create_ticket(&stores, RecordScope::All, &explicit).await.unwrap();
    }

    #[tokio::test]
    async fn students_open_tickets_only_for_themselves() {
        let stores = Stores::in_memory();
        let me = test_support::student(&stores, "S1").await;
        let other = test_support::student(&stores, "S2").await;
        let mut input = ticket(other.id);
        input.room_number = Some("101".into());

        assert_matches!(
            create_ticket(&stores, RecordScope::Own(me.id), &input).await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }

    #[tokio::test]
    async fn any_status_reachable_but_unknown_rejected() {
        let stores = Stores::in_memory();
        let student = test_support::student(&stores, "S1").await;
        let mut input = ticket(student.id);
        input.room_number = Some("101".into());
        let created = create_ticket(&stores, RecordScope::All, &input).await.unwrap();

        let done = update_status(&stores, created.id, "completed").await.unwrap();
        assert_eq!(done.status, TicketStatus::Completed);
        assert!(done.updated_at >= created.updated_at);
        let reopened = update_status(&stores, created.id, "pending").await.unwrap();
        assert_eq!(reopened.status, TicketStatus::Pending);

        assert_matches!(
            update_status(&stores, created.id, "closed").await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            update_status(&stores, uuid::Uuid::new_v4(), "completed").await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }
}
