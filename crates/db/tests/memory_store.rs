//! Store contract tests against the in-memory backend.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use hostel_core::fee::FeeStatus;
use hostel_core::movement::MovementAction;
use hostel_core::roles::Role;
use hostel_core::room::RoomStatus;
use hostel_core::student::StudentStatus;
use hostel_db::models::fee::NewFee;
use hostel_db::models::movement::NewMovement;
use hostel_db::models::room::{CreateRoom, RoomLayout};
use hostel_db::models::student::{CreateStudent, RoomAssignment};
use hostel_db::models::user::CreateUser;
use hostel_db::store::{UQ_ROOM_NUMBER, UQ_STUDENT_CODE, UQ_USER_STUDENT_CODE};
use hostel_db::{StoreError, Stores};

fn student_input(code: &str) -> CreateStudent {
    CreateStudent {
        name: format!("Student {code}"),
        email: format!("{code}@example.com"),
        phone: "555-0100".into(),
        student_id: code.into(),
    }
}

fn room_input(number: &str, capacity: i32) -> CreateRoom {
    CreateRoom {
        room_number: number.into(),
        floor: 1,
        capacity,
    }
}

#[tokio::test]
async fn new_student_starts_out_without_room() {
    let stores = Stores::in_memory();
    let student = stores.students.insert(&student_input("S1")).await.unwrap();

    assert_eq!(student.status, StudentStatus::Out);
    assert!(student.room_id.is_none());
    assert!(student.room_number.is_none());
}

#[tokio::test]
async fn duplicate_keys_report_constraint_names() {
    let stores = Stores::in_memory();
    stores.students.insert(&student_input("S1")).await.unwrap();
    stores.rooms.insert(&room_input("101", 2)).await.unwrap();

    let err = stores.students.insert(&student_input("S1")).await.unwrap_err();
    assert!(err.is_unique_violation(UQ_STUDENT_CODE));

    let err = stores.rooms.insert(&room_input("101", 4)).await.unwrap_err();
    assert_matches!(err, StoreError::UniqueViolation(ref name) if name == UQ_ROOM_NUMBER);
}

fn user_input(username: &str, role: Role, student_code: Option<&str>) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "hash".to_string(),
        role,
        full_name: "Test User".to_string(),
        phone: None,
        student_code: student_code.map(str::to_string),
    }
}

#[tokio::test]
async fn student_code_links_to_at_most_one_account() {
    let stores = Stores::in_memory();
    stores
        .users
        .insert(&user_input("owner", Role::Student, Some("S1")))
        .await
        .unwrap();

    let err = stores
        .users
        .insert(&user_input("other", Role::Student, Some("S1")))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation(UQ_USER_STUDENT_CODE));

    stores.users.insert(&user_input("w1", Role::Warden, None)).await.unwrap();
    stores.users.insert(&user_input("w2", Role::Warden, None)).await.unwrap();
}

#[tokio::test]
async fn reserve_slot_stops_at_capacity() {
    let stores = Stores::in_memory();
    let room = stores.rooms.insert(&room_input("101", 2)).await.unwrap();

    let first = stores.rooms.reserve_slot(room.id).await.unwrap().unwrap();
    assert_eq!((first.occupied, first.status), (1, RoomStatus::Available));

    let second = stores.rooms.reserve_slot(room.id).await.unwrap().unwrap();
    assert_eq!((second.occupied, second.status), (2, RoomStatus::Occupied));

    assert!(stores.rooms.reserve_slot(room.id).await.unwrap().is_none());

    let released = stores.rooms.release_slot(room.id).await.unwrap().unwrap();
    assert_eq!((released.occupied, released.status), (1, RoomStatus::Available));
}

#[tokio::test]
async fn concurrent_reservations_never_overfill() {
    let stores = Stores::in_memory();
    let room = stores.rooms.insert(&room_input("201", 3)).await.unwrap();
    let room_id = room.id;
    let rooms = Arc::clone(&stores.rooms);

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let rooms = Arc::clone(&rooms);
            tokio::spawn(async move { rooms.reserve_slot(room_id).await.unwrap().is_some() })
        })
        .collect();

    let mut granted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            granted += 1;
        }
    }

    assert_eq!(granted, 3);
    let room = stores.rooms.find_by_id(room_id).await.unwrap().unwrap();
    assert_eq!(room.occupied, 3);
    assert_eq!(room.status, RoomStatus::Occupied);
}

#[tokio::test]
async fn release_on_empty_room_is_refused() {
    let stores = Stores::in_memory();
    let room = stores.rooms.insert(&room_input("101", 2)).await.unwrap();
    assert!(stores.rooms.release_slot(room.id).await.unwrap().is_none());
}

#[tokio::test]
async fn maintenance_layout_blocks_reservations() {
    let stores = Stores::in_memory();
    let room = stores.rooms.insert(&room_input("101", 2)).await.unwrap();
    let layout = RoomLayout {
        floor: 1,
        capacity: 2,
        under_maintenance: true,
    };

    let updated = stores.rooms.update_layout(room.id, layout).await.unwrap().unwrap();
    assert_eq!(updated.status, RoomStatus::Maintenance);
    assert!(stores.rooms.reserve_slot(room.id).await.unwrap().is_none());
    assert!(stores.rooms.list_available().await.unwrap().is_empty());
}

#[tokio::test]
async fn assign_room_only_when_unassigned() {
    let stores = Stores::in_memory();
    let student = stores.students.insert(&student_input("S1")).await.unwrap();
    let room = stores.rooms.insert(&room_input("101", 2)).await.unwrap();
    let assignment = RoomAssignment {
        room_id: room.id,
        room_number: room.room_number.clone(),
    };

    let assigned = stores.students.assign_room(student.id, &assignment).await.unwrap().unwrap();
    assert_eq!(assigned.room_id, Some(room.id));
    assert_eq!(assigned.room_number.as_deref(), Some("101"));

    assert!(stores.students.assign_room(student.id, &assignment).await.unwrap().is_none());

    let other_room = uuid::Uuid::new_v4();
    assert!(stores.students.clear_room(student.id, other_room).await.unwrap().is_none());
    let cleared = stores.students.clear_room(student.id, room.id).await.unwrap().unwrap();
    assert!(cleared.room_id.is_none());
}

#[tokio::test]
async fn movements_list_newest_first_with_limit() {
    let stores = Stores::in_memory();
    let student = stores.students.insert(&student_input("S1")).await.unwrap();
    let base = Utc::now();

    for minutes in 0..5 {
        stores
            .movements
            .insert(&NewMovement {
                student_id: student.id,
                student_name: student.name.clone(),
                action: MovementAction::CheckIn,
                recorded_at: base + Duration::minutes(minutes),
                note: None,
            })
            .await
            .unwrap();
    }

    let recent = stores.movements.list(None, Some(3)).await.unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].recorded_at, base + Duration::minutes(4));
    assert!(recent.windows(2).all(|w| w[0].recorded_at >= w[1].recorded_at));
}

#[tokio::test]
async fn overdue_classification_and_sweep() {
    let stores = Stores::in_memory();
    let student = stores.students.insert(&student_input("S1")).await.unwrap();
    let now = Utc::now();
    let fee = |days: i64| NewFee {
        student_id: student.id,
        student_name: student.name.clone(),
        fee_type: "rent".into(),
        amount: 100.0,
        due_date: now + Duration::days(days),
        created_at: now,
    };

    let past = stores.fees.insert(&fee(-3)).await.unwrap();
    let future = stores.fees.insert(&fee(3)).await.unwrap();

    let overdue = stores.fees.list_overdue(now, None).await.unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id, past.id);
    // Listing does not write.
    assert_eq!(overdue[0].status, FeeStatus::Pending);

    assert_eq!(stores.fees.mark_overdue(now).await.unwrap(), 1);
    assert_eq!(stores.fees.mark_overdue(now).await.unwrap(), 0);
    let swept = stores.fees.find_by_id(past.id).await.unwrap().unwrap();
    assert_eq!(swept.status, FeeStatus::Overdue);

    let paid = stores.fees.mark_paid(past.id, now).await.unwrap().unwrap();
    assert_eq!(paid.status, FeeStatus::Paid);
    assert_eq!(paid.paid_date, Some(now));
    assert!(stores.fees.mark_paid(past.id, now).await.unwrap().is_none());

    assert_eq!(stores.fees.count_overdue(now, None).await.unwrap(), 0);
    assert_eq!(
        stores.fees.find_by_id(future.id).await.unwrap().unwrap().status,
        FeeStatus::Pending
    );
}

#[tokio::test]
async fn memory_backend_reports_healthy() {
    let stores = Stores::in_memory();
    assert_eq!(stores.backend_name(), "memory");
    stores.health_check().await.unwrap();
}
