//! Repository for the `rooms` table.
//!
//! Status is recomputed in SQL on every write that touches `occupied`,
//! `capacity` or the maintenance flag, mirroring
//! [`hostel_core::room::derive_status`]. `UPDATE ... SET` expressions see the
//! pre-update row, so `occupied + 1` below is the new count.

use async_trait::async_trait;
use hostel_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::room::{CreateRoom, Room, RoomCounts, RoomLayout};
use crate::store::RoomStore;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, room_number, floor, capacity, occupied, status, created_at, updated_at";

pub struct RoomRepo {
    pool: PgPool,
}

impl RoomRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for RoomRepo {
    async fn insert(&self, input: &CreateRoom) -> StoreResult<Room> {
        let query = format!(
            "INSERT INTO rooms (room_number, floor, capacity)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let room = sqlx::query_as::<_, Room>(&query)
            .bind(&input.room_number)
            .bind(input.floor)
            .bind(input.capacity)
            .fetch_one(&self.pool)
            .await?;
        Ok(room)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Room>> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        let room = sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(room)
    }

    async fn list(&self) -> StoreResult<Vec<Room>> {
        let query = format!("SELECT {COLUMNS} FROM rooms ORDER BY room_number");
        let rooms = sqlx::query_as::<_, Room>(&query).fetch_all(&self.pool).await?;
        Ok(rooms)
    }

    async fn list_available(&self) -> StoreResult<Vec<Room>> {
        let query = format!(
            "SELECT {COLUMNS} FROM rooms
             WHERE status <> 'maintenance' AND occupied < capacity
             ORDER BY room_number"
        );
        let rooms = sqlx::query_as::<_, Room>(&query).fetch_all(&self.pool).await?;
        Ok(rooms)
    }

    async fn update_layout(&self, id: DbId, layout: RoomLayout) -> StoreResult<Option<Room>> {
        let query = format!(
            "UPDATE rooms SET
                floor = $2,
                capacity = $3,
                status = CASE
                    WHEN $4 THEN 'maintenance'
                    WHEN occupied >= $3 THEN 'occupied'
                    ELSE 'available'
                END,
                updated_at = now()
             WHERE id = $1 AND occupied <= $3
             RETURNING {COLUMNS}"
        );
        let room = sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(layout.floor)
            .bind(layout.capacity)
            .bind(layout.under_maintenance)
            .fetch_optional(&self.pool)
            .await?;
        Ok(room)
    }

    async fn reserve_slot(&self, id: DbId) -> StoreResult<Option<Room>> {
        let query = format!(
            "UPDATE rooms SET
                occupied = occupied + 1,
                status = CASE WHEN occupied + 1 >= capacity THEN 'occupied' ELSE 'available' END,
                updated_at = now()
             WHERE id = $1 AND occupied < capacity AND status <> 'maintenance'
             RETURNING {COLUMNS}"
        );
        let room = sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(room)
    }

    async fn release_slot(&self, id: DbId) -> StoreResult<Option<Room>> {
        let query = format!(
            "UPDATE rooms SET
                occupied = occupied - 1,
                status = CASE
                    WHEN status = 'maintenance' THEN 'maintenance'
                    WHEN occupied - 1 >= capacity THEN 'occupied'
                    ELSE 'available'
                END,
                updated_at = now()
             WHERE id = $1 AND occupied > 0
             RETURNING {COLUMNS}"
        );
        let room = sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(room)
    }

    async fn delete_if_empty(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1 AND occupied = 0")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_status(&self) -> StoreResult<RoomCounts> {
        let counts = sqlx::query_as::<_, RoomCounts>(
            "SELECT COUNT(*) AS total_rooms,
                    COUNT(*) FILTER (WHERE status = 'occupied') AS occupied_rooms,
                    COUNT(*) FILTER (WHERE status = 'available') AS available_rooms,
                    COUNT(*) FILTER (WHERE status = 'maintenance') AS maintenance_rooms
             FROM rooms",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }
}
