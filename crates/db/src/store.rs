//! Persistence contracts.
//!
//! One object-safe trait per collection. Every mutation touches a single
//! document; the conditional variants (`reserve_slot`, `assign_room`,
//! `check_out`, `mark_paid`, ...) apply their guard and their write
//! atomically and return `None` when the guard fails, which is how callers
//! avoid read-then-write races without multi-document transactions.
//!
//! Filters of type `Option<DbId>` restrict results to one student; `None`
//! means unfiltered.

use std::sync::Arc;

use async_trait::async_trait;
use hostel_core::maintenance::TicketStatus;
use hostel_core::student::StudentStatus;
use hostel_core::types::{DbId, Timestamp};

use crate::error::StoreResult;
use crate::memory::MemoryStore;
use crate::models::fee::{FeeRecord, NewFee};
use crate::models::maintenance::{MaintenanceTicket, NewTicket};
use crate::models::movement::{Movement, NewMovement};
use crate::models::room::{CreateRoom, Room, RoomCounts, RoomLayout};
use crate::models::student::{CreateStudent, PresenceCounts, RoomAssignment, Student, UpdateStudent};
use crate::models::user::{CreateUser, User};
use crate::models::visitor::{NewVisitor, Visitor};
use crate::repositories::{
    FeeRepo, MaintenanceRepo, MovementRepo, RoomRepo, StudentRepo, UserRepo, VisitorRepo,
};
use crate::DbPool;

/// Unique constraint on `students.student_id`.
pub const UQ_STUDENT_CODE: &str = "uq_students_student_id";
/// Unique constraint on `rooms.room_number`.
pub const UQ_ROOM_NUMBER: &str = "uq_rooms_room_number";
/// Unique constraint on `users.username`.
pub const UQ_USERNAME: &str = "uq_users_username";
/// Unique constraint on `users.email`.
pub const UQ_USER_EMAIL: &str = "uq_users_email";
/// Unique constraint on `users.student_code`: one account per Student record.
pub const UQ_USER_STUDENT_CODE: &str = "uq_users_student_code";

#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert with status `out`, no room.
    async fn insert(&self, input: &CreateStudent) -> StoreResult<Student>;
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Student>>;
    async fn find_by_code(&self, student_code: &str) -> StoreResult<Option<Student>>;
    /// Newest first.
    async fn list(&self, filter: Option<DbId>) -> StoreResult<Vec<Student>>;
    /// Apply non-`None` profile fields.
    async fn update_profile(&self, id: DbId, input: &UpdateStudent) -> StoreResult<Option<Student>>;
    /// Delete and return the removed row.
    async fn delete(&self, id: DbId) -> StoreResult<Option<Student>>;
    /// Set the room reference only if the student currently has none.
    async fn assign_room(&self, id: DbId, assignment: &RoomAssignment) -> StoreResult<Option<Student>>;
    /// Clear the room reference only if it currently points at `room_id`.
    async fn clear_room(&self, id: DbId, room_id: DbId) -> StoreResult<Option<Student>>;
    /// Set presence status and `last_seen`.
    async fn set_presence(
        &self,
        id: DbId,
        status: StudentStatus,
        seen_at: Timestamp,
    ) -> StoreResult<Option<Student>>;
    async fn count_presence(&self, filter: Option<DbId>) -> StoreResult<PresenceCounts>;
}

#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Insert with `occupied = 0`, status `available`.
    async fn insert(&self, input: &CreateRoom) -> StoreResult<Room>;
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Room>>;
    /// Ordered by room number.
    async fn list(&self) -> StoreResult<Vec<Room>>;
    /// Rooms with a free place that are not under maintenance.
    async fn list_available(&self) -> StoreResult<Vec<Room>>;
    /// Write floor, capacity and maintenance flag, recomputing status.
    /// Guard: `occupied <= layout.capacity`.
    async fn update_layout(&self, id: DbId, layout: RoomLayout) -> StoreResult<Option<Room>>;
    /// `occupied += 1`, status recomputed.
    /// Guard: `occupied < capacity` and not under maintenance.
    async fn reserve_slot(&self, id: DbId) -> StoreResult<Option<Room>>;
    /// `occupied -= 1`, status recomputed. Guard: `occupied > 0`.
    async fn release_slot(&self, id: DbId) -> StoreResult<Option<Room>>;
    /// Delete only if nobody occupies the room. Returns `true` if deleted.
    async fn delete_if_empty(&self, id: DbId) -> StoreResult<bool>;
    async fn count_by_status(&self) -> StoreResult<RoomCounts>;
}

#[async_trait]
pub trait MovementStore: Send + Sync {
    async fn insert(&self, input: &NewMovement) -> StoreResult<Movement>;
    /// Newest first, at most `limit` rows when given.
    async fn list(&self, filter: Option<DbId>, limit: Option<i64>) -> StoreResult<Vec<Movement>>;
    /// Remove an entry. Only used to undo an append whose student vanished.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait VisitorStore: Send + Sync {
    async fn insert(&self, input: &NewVisitor) -> StoreResult<Visitor>;
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Visitor>>;
    /// Newest check-in first; `active_only` keeps `checked_in` visits.
    async fn list(&self, host: Option<DbId>, active_only: bool) -> StoreResult<Vec<Visitor>>;
    /// Close a visit. Guard: status is `checked_in`.
    async fn check_out(&self, id: DbId, at: Timestamp) -> StoreResult<Option<Visitor>>;
    async fn count_active(&self, host: Option<DbId>) -> StoreResult<i64>;
}

#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    async fn insert(&self, input: &NewTicket) -> StoreResult<MaintenanceTicket>;
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<MaintenanceTicket>>;
    /// Newest first.
    async fn list(&self, filter: Option<DbId>) -> StoreResult<Vec<MaintenanceTicket>>;
    async fn set_status(
        &self,
        id: DbId,
        status: TicketStatus,
        at: Timestamp,
    ) -> StoreResult<Option<MaintenanceTicket>>;
    async fn count_with_status(&self, status: TicketStatus, filter: Option<DbId>) -> StoreResult<i64>;
}

#[async_trait]
pub trait FeeStore: Send + Sync {
    async fn insert(&self, input: &NewFee) -> StoreResult<FeeRecord>;
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<FeeRecord>>;
    /// Newest first.
    async fn list(&self, filter: Option<DbId>) -> StoreResult<Vec<FeeRecord>>;
    /// Unpaid records due strictly before `now`, earliest due first. Read-only.
    async fn list_overdue(&self, now: Timestamp, filter: Option<DbId>) -> StoreResult<Vec<FeeRecord>>;
    /// Mark paid. Guard: status is not `paid`.
    async fn mark_paid(&self, id: DbId, at: Timestamp) -> StoreResult<Option<FeeRecord>>;
    /// Persist `pending -> overdue` for records due before `now`. Returns the count.
    async fn mark_overdue(&self, now: Timestamp) -> StoreResult<u64>;
    async fn count_overdue(&self, now: Timestamp, filter: Option<DbId>) -> StoreResult<i64>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, input: &CreateUser) -> StoreResult<User>;
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn record_login(&self, id: DbId, at: Timestamp) -> StoreResult<()>;
}


#[derive(Clone)]
enum Backend {
    Postgres(DbPool),
    Memory,
}

/// Handles to every collection, passed into each component at construction.
///
/// Cheap to clone: every field is an `Arc`.
#[derive(Clone)]
pub struct Stores {
    pub students: Arc<dyn StudentStore>,
    pub rooms: Arc<dyn RoomStore>,
    pub movements: Arc<dyn MovementStore>,
    pub visitors: Arc<dyn VisitorStore>,
    pub maintenance: Arc<dyn MaintenanceStore>,
    pub fees: Arc<dyn FeeStore>,
    pub users: Arc<dyn UserStore>,
    backend: Backend,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            students: Arc::new(StudentRepo::new(pool.clone())),
            rooms: Arc::new(RoomRepo::new(pool.clone())),
            movements: Arc::new(MovementRepo::new(pool.clone())),
            visitors: Arc::new(VisitorRepo::new(pool.clone())),
            maintenance: Arc::new(MaintenanceRepo::new(pool.clone())),
            fees: Arc::new(FeeRepo::new(pool.clone())),
            users: Arc::new(UserRepo::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    /// A fresh, isolated in-memory store. Each call starts empty.
    pub fn in_memory() -> Self {
        let memory = Arc::new(MemoryStore::default());
        Self {
            students: memory.clone(),
            rooms: memory.clone(),
            movements: memory.clone(),
            visitors: memory.clone(),
            maintenance: memory.clone(),
            fees: memory.clone(),
            users: memory,
            backend: Backend::Memory,
        }
    }

    /// Backend name for logs and the health endpoint.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Verify the backend is reachable.
    pub async fn health_check(&self) -> StoreResult<()> {
        match &self.backend {
            Backend::Postgres(pool) => crate::health_check(pool).await.map_err(Into::into),
            Backend::Memory => Ok(()),
        }
    }
}
