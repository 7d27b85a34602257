//! Room occupancy rules.
//!
//! Invariants kept by every writer:
//! - `0 <= occupied <= capacity`, `capacity > 0`
//! - status is `maintenance` while administratively flagged, otherwise
//!   `occupied` exactly when `occupied >= capacity`, else `available`
//!
//! The PostgreSQL store expresses the same arithmetic in SQL; the in-memory
//! store calls these functions directly.

use crate::error::CoreError;

define_text_enum! {
    /// Room availability status.
    RoomStatus ("room status") {
        Available = "available",
        Occupied = "occupied",
        Maintenance = "maintenance",
    }
}

/// Derive the status a room must carry for the given counts.
pub fn derive_status(occupied: i32, capacity: i32, under_maintenance: bool) -> RoomStatus {
    if under_maintenance {
        RoomStatus::Maintenance
    } else if occupied >= capacity {
        RoomStatus::Occupied
    } else {
        RoomStatus::Available
    }
}

/// Capacity must be a positive integer.
pub fn validate_capacity(capacity: i32) -> Result<(), CoreError> {
    if capacity <= 0 {
        return Err(CoreError::Validation(format!(
            "Room capacity must be a positive integer, got {capacity}"
        )));
    }
    Ok(())
}

/// A capacity change may not leave current occupants without a place.
pub fn validate_capacity_change(new_capacity: i32, occupied: i32) -> Result<(), CoreError> {
    validate_capacity(new_capacity)?;
    if new_capacity < occupied {
        return Err(CoreError::Validation(format!(
            "Room capacity {new_capacity} is below its current occupancy of {occupied}"
        )));
    }
    Ok(())
}

/// Check that the room has a free place.
///
/// A full room always reports `CapacityExceeded`, even when it is also under
/// maintenance.
pub fn check_capacity(room_number: &str, occupied: i32, capacity: i32) -> Result<(), CoreError> {
    if occupied >= capacity {
        return Err(CoreError::CapacityExceeded {
            room_number: room_number.to_string(),
            capacity,
        });
    }
    Ok(())
}

/// Check that one more student can be placed in the room.
pub fn check_can_allocate(
    room_number: &str,
    occupied: i32,
    capacity: i32,
    status: RoomStatus,
) -> Result<(), CoreError> {
    check_capacity(room_number, occupied, capacity)?;
    if status == RoomStatus::Maintenance {
        return Err(CoreError::InvalidState(format!(
            "Room {room_number} is under maintenance"
        )));
    }
    Ok(())
}

/// Counts and status after placing one more student, or `None` if the room
/// cannot take another.
pub fn after_allocation(occupied: i32, capacity: i32, status: RoomStatus) -> Option<(i32, RoomStatus)> {
    if status == RoomStatus::Maintenance || occupied >= capacity {
        return None;
    }
    let next = occupied + 1;
    Some((next, derive_status(next, capacity, false)))
}

/// Counts and status after one student leaves, or `None` if the room is empty.
pub fn after_release(occupied: i32, capacity: i32, status: RoomStatus) -> Option<(i32, RoomStatus)> {
    if occupied <= 0 {
        return None;
    }
    let next = occupied - 1;
    Some((next, derive_status(next, capacity, status == RoomStatus::Maintenance)))
}

/// Whether a room belongs in the "available rooms" listing.
pub fn is_available(occupied: i32, capacity: i32, status: RoomStatus) -> bool {
    status != RoomStatus::Maintenance && occupied < capacity
}
