//! Room Directory: room records, occupancy and allocation.
//!
//! Allocation touches two documents. The room slot is taken first with a
//! conditional increment, then the student's room reference is set with a
//! conditional write; if the second write loses a race the slot is released
//! again. Neither step can over-fill a room, so concurrent allocations for the
//! last place cannot both succeed.

use hostel_core::error::CoreError;
use hostel_core::room::{self, RoomStatus};
use hostel_core::types::DbId;
use hostel_db::models::room::{CreateRoom, Room, RoomLayout, UpdateRoom};
use hostel_db::models::student::{RoomAssignment, Student};
use hostel_db::store::UQ_ROOM_NUMBER;
use hostel_db::{StoreError, Stores};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Room and student as they stand after an allocation or vacate.
#[derive(Debug, Serialize)]
pub struct RoomAssignmentResult {
    pub room: Room,
    pub student: Student,
}

pub async fn create_room(stores: &Stores, input: &CreateRoom) -> AppResult<Room> {
    input.validate()?;
    room::validate_capacity(input.capacity)?;

    let created = stores.rooms.insert(input).await.map_err(|err| match err {
        StoreError::UniqueViolation(ref c) if c == UQ_ROOM_NUMBER => AppError::validation(format!(
            "Room number {} already exists",
            input.room_number
        )),
        other => other.into(),
    })?;

    tracing::info!(room_id = %created.id, room_number = %created.room_number, capacity = created.capacity, "Room created");
    Ok(created)
}

pub async fn get_room(stores: &Stores, id: DbId) -> AppResult<Room> {
    stores
        .rooms
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Room", id))
}

pub async fn list_rooms(stores: &Stores) -> AppResult<Vec<Room>> {
    Ok(stores.rooms.list().await?)
}

/// Rooms with a free place that are not under maintenance.
pub async fn list_available(stores: &Stores) -> AppResult<Vec<Room>> {
    Ok(stores.rooms.list_available().await?)
}

/// Change floor, capacity or the maintenance flag.
///
/// Capacity may not fall below the current occupancy. The guard is re-checked
/// by the store, so an allocation landing between the read and the write is
/// reported rather than overwritten.
pub async fn update_room(stores: &Stores, id: DbId, input: &UpdateRoom) -> AppResult<Room> {
    if input.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }

    let current = get_room(stores, id).await?;
    let layout = RoomLayout {
        floor: input.floor.unwrap_or(current.floor),
        capacity: input.capacity.unwrap_or(current.capacity),
        under_maintenance: input
            .under_maintenance
            .unwrap_or(current.status == RoomStatus::Maintenance),
    };
    room::validate_capacity_change(layout.capacity, current.occupied)?;

    match stores.rooms.update_layout(id, layout).await? {
        Some(updated) => {
            tracing::info!(
                room_id = %id,
                capacity = updated.capacity,
                status = %updated.status,
                "Room updated"
            );
            Ok(updated)
        }
        None => {
            let latest = get_room(stores, id).await?;
            room::validate_capacity_change(layout.capacity, latest.occupied)?;
            Err(AppError::InternalError(format!(
                "Room {id} layout update was rejected by the store"
            )))
        }
    }
}

/// Delete a room nobody occupies.
pub async fn delete_room(stores: &Stores, id: DbId) -> AppResult<()> {
    let current = get_room(stores, id).await?;
    if !stores.rooms.delete_if_empty(id).await? {
        let occupied = match stores.rooms.find_by_id(id).await? {
            Some(latest) => latest.occupied,
            None => return Err(AppError::not_found("Room", id)),
        };
        return Err(AppError::invalid_state(format!(
            "Room {} still has {occupied} occupant(s)",
            current.room_number
        )));
    }
    tracing::info!(room_id = %id, room_number = %current.room_number, "Room deleted");
    Ok(())
}

/// Place a student in a room.
///
/// Fails with `NotFound` for an unknown room or student, then
/// `CapacityExceeded` when the room is full, then `InvalidState` when the room
/// is under maintenance or the student already holds a room. A failed
/// allocation leaves both records unchanged.
pub async fn allocate(stores: &Stores, room_id: DbId, student_id: DbId) -> AppResult<RoomAssignmentResult> {
    let target = get_room(stores, room_id).await?;
    let student = stores
        .students
        .find_by_id(student_id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", student_id))?;

    room::check_can_allocate(&target.room_number, target.occupied, target.capacity, target.status)?;
    if let Some(current) = &student.room_number {
        return Err(AppError::invalid_state(format!(
            "Student {} is already assigned to room {current}",
            student.student_id
        )));
    }

    let Some(reserved) = stores.rooms.reserve_slot(room_id).await? else {
        // Lost the race for the last place, or the room changed under us.
        let latest = get_room(stores, room_id).await?;
        room::check_can_allocate(&latest.room_number, latest.occupied, latest.capacity, latest.status)?;
        return Err(CoreError::CapacityExceeded {
            room_number: latest.room_number,
            capacity: latest.capacity,
        }
        .into());
    };

    let assignment = RoomAssignment {
        room_id,
        room_number: reserved.room_number.clone(),
    };
    let assigned = match stores.students.assign_room(student_id, &assignment).await {
        Ok(Some(assigned)) => assigned,
        Ok(None) => {
            let room = release_reserved(stores, room_id).await;
            tracing::warn!(%room_id, %student_id, occupied = ?room.map(|r| r.occupied), "Allocation rolled back");
            return Err(match stores.students.find_by_id(student_id).await? {
                None => AppError::not_found("Student", student_id),
                Some(s) => AppError::invalid_state(format!(
                    "Student {} is already assigned to room {}",
                    s.student_id,
                    s.room_number.unwrap_or_default()
                )),
            });
        }
        Err(err) => {
            release_reserved(stores, room_id).await;
            tracing::warn!(%room_id, %student_id, "Allocation rolled back after store error");
            return Err(err.into());
        }
    };

    tracing::info!(
        %room_id,
        %student_id,
        occupied = reserved.occupied,
        capacity = reserved.capacity,
        status = %reserved.status,
        "Student allocated to room"
    );
    Ok(RoomAssignmentResult {
        room: reserved,
        student: assigned,
    })
}

/// Remove a student from a room. Inverse of [`allocate`].
pub async fn vacate(stores: &Stores, room_id: DbId, student_id: DbId) -> AppResult<RoomAssignmentResult> {
    let target = get_room(stores, room_id).await?;
    if stores.students.find_by_id(student_id).await?.is_none() {
        return Err(AppError::not_found("Student", student_id));
    }

    let Some(cleared) = stores.students.clear_room(student_id, room_id).await? else {
        return Err(AppError::invalid_state(format!(
            "Student is not assigned to room {}",
            target.room_number
        )));
    };

    let Some(room) = stores.rooms.release_slot(room_id).await? else {
        tracing::error!(%room_id, %student_id, "Vacated student from a room with no recorded occupants");
        return Err(AppError::InternalError(format!(
            "Room {room_id} had no occupant to release for student {student_id}"
        )));
    };

    tracing::info!(%room_id, %student_id, occupied = room.occupied, "Student vacated room");
    Ok(RoomAssignmentResult { room, student: cleared })
}

/// Give back a slot taken by [`allocate`]; failures are logged, not returned.
pub(crate) async fn release_reserved(stores: &Stores, room_id: DbId) -> Option<Room> {
    match stores.rooms.release_slot(room_id).await {
        Ok(Some(room)) => Some(room),
        Ok(None) => {
            tracing::error!(%room_id, "Room slot release found no occupant to release");
            None
        }
        Err(e) => {
            tracing::error!(%room_id, error = %e, "Room slot release failed");
            None
        }
    }
}
