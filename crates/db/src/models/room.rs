//! Room entity model and DTOs.

use hostel_core::room::RoomStatus;
use hostel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub room_number: String,
    pub floor: i32,
    pub capacity: i32,
    pub occupied: i32,
    #[sqlx(try_from = "String")]
    pub status: RoomStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a room. Capacity is checked by the room directory.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoom {
    #[validate(length(min = 1, max = 32, message = "room_number must be 1-32 characters"))]
    pub room_number: String,
    pub floor: i32,
    pub capacity: i32,
}

/// DTO for updating a room's layout or maintenance flag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRoom {
    pub floor: Option<i32>,
    pub capacity: Option<i32>,
    pub under_maintenance: Option<bool>,
}

impl UpdateRoom {
    pub fn is_empty(&self) -> bool {
        self.floor.is_none() && self.capacity.is_none() && self.under_maintenance.is_none()
    }
}

/// Fully resolved layout written by [`crate::store::RoomStore::update_layout`].
#[derive(Debug, Clone, Copy)]
pub struct RoomLayout {
    pub floor: i32,
    pub capacity: i32,
    pub under_maintenance: bool,
}

/// Room counts by status for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct RoomCounts {
    pub total_rooms: i64,
    pub occupied_rooms: i64,
    pub available_rooms: i64,
    pub maintenance_rooms: i64,
}
