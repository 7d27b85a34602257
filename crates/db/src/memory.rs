//! In-memory store.
//!
//! Implements every store trait over plain vectors behind one
//! [`tokio::sync::RwLock`]. Each conditional write checks its guard and
//! applies the change under the same write guard, so the atomicity contract
//! matches the PostgreSQL repositories. Unique keys are checked by hand and
//! reported with the same constraint names the migrations declare.
//!
//! Used by the test suites and by `STORAGE_BACKEND=memory` for local runs.
//! Nothing is persisted.

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;
use hostel_core::fee::{self, FeeStatus};
use hostel_core::maintenance::TicketStatus;
use hostel_core::room::{self, RoomStatus};
use hostel_core::student::StudentStatus;
use hostel_core::types::{new_id, DbId, Timestamp};
use hostel_core::visitor::VisitorStatus;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::fee::{FeeRecord, NewFee};
use crate::models::maintenance::{MaintenanceTicket, NewTicket};
use crate::models::movement::{Movement, NewMovement};
use crate::models::room::{CreateRoom, Room, RoomCounts, RoomLayout};
use crate::models::student::{CreateStudent, PresenceCounts, RoomAssignment, Student, UpdateStudent};
use crate::models::user::{CreateUser, User};
use crate::models::visitor::{NewVisitor, Visitor};
use crate::store::{
    FeeStore, MaintenanceStore, MovementStore, RoomStore, StudentStore, UserStore, VisitorStore,
    UQ_ROOM_NUMBER, UQ_STUDENT_CODE, UQ_USERNAME, UQ_USER_EMAIL, UQ_USER_STUDENT_CODE,
};

#[derive(Default)]
struct Tables {
    students: Vec<Student>,
    rooms: Vec<Room>,
    movements: Vec<Movement>,
    visitors: Vec<Visitor>,
    tickets: Vec<MaintenanceTicket>,
    fees: Vec<FeeRecord>,
    users: Vec<User>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

/// Newest first. Rows are appended in creation order, so reversing before the
/// stable sort breaks timestamp ties in favour of the later insert.
fn newest_first<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.reverse();
    rows.sort_by_key(|row| Reverse(key(row)));
    rows
}

fn matches_owner(filter: Option<DbId>, owner: DbId) -> bool {
    filter.map_or(true, |id| id == owner)
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn insert(&self, input: &CreateStudent) -> StoreResult<Student> {
        let mut tables = self.tables.write().await;
        if tables.students.iter().any(|s| s.student_id == input.student_id) {
            return Err(StoreError::UniqueViolation(UQ_STUDENT_CODE.into()));
        }
        let now = Utc::now();
        let student = Student {
            id: new_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            student_id: input.student_id.clone(),
            room_id: None,
            room_number: None,
            status: StudentStatus::default(),
            created_at: now,
            last_seen: now,
            updated_at: now,
        };
        tables.students.push(student.clone());
        Ok(student)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Student>> {
        let tables = self.tables.read().await;
        Ok(tables.students.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_code(&self, student_code: &str) -> StoreResult<Option<Student>> {
        let tables = self.tables.read().await;
        Ok(tables.students.iter().find(|s| s.student_id == student_code).cloned())
    }

    async fn list(&self, filter: Option<DbId>) -> StoreResult<Vec<Student>> {
        let tables = self.tables.read().await;
        let rows: Vec<Student> = tables
            .students
            .iter()
            .filter(|s| matches_owner(filter, s.id))
            .cloned()
            .collect();
        Ok(newest_first(rows, |s| s.created_at))
    }

    async fn update_profile(&self, id: DbId, input: &UpdateStudent) -> StoreResult<Option<Student>> {
        let mut tables = self.tables.write().await;
        let Some(student) = tables.students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            student.name = name.clone();
        }
        if let Some(email) = &input.email {
            student.email = email.clone();
        }
        if let Some(phone) = &input.phone {
            student.phone = phone.clone();
        }
        student.updated_at = Utc::now();
        Ok(Some(student.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Student>> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables.students.iter().position(|s| s.id == id) else {
            return Ok(None);
        };
        Ok(Some(tables.students.remove(pos)))
    }

    async fn assign_room(&self, id: DbId, assignment: &RoomAssignment) -> StoreResult<Option<Student>> {
        let mut tables = self.tables.write().await;
        let Some(student) = tables.students.iter_mut().find(|s| s.id == id && s.room_id.is_none()) else {
            return Ok(None);
        };
        student.room_id = Some(assignment.room_id);
        student.room_number = Some(assignment.room_number.clone());
        student.updated_at = Utc::now();
        Ok(Some(student.clone()))
    }

    async fn clear_room(&self, id: DbId, room_id: DbId) -> StoreResult<Option<Student>> {
        let mut tables = self.tables.write().await;
        let Some(student) = tables
            .students
            .iter_mut()
            .find(|s| s.id == id && s.room_id == Some(room_id))
        else {
            return Ok(None);
        };
        student.room_id = None;
        student.room_number = None;
        student.updated_at = Utc::now();
        Ok(Some(student.clone()))
    }

    async fn set_presence(
        &self,
        id: DbId,
        status: StudentStatus,
        seen_at: Timestamp,
    ) -> StoreResult<Option<Student>> {
        let mut tables = self.tables.write().await;
        let Some(student) = tables.students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        student.status = status;
        student.last_seen = seen_at;
        student.updated_at = Utc::now();
        Ok(Some(student.clone()))
    }

    async fn count_presence(&self, filter: Option<DbId>) -> StoreResult<PresenceCounts> {
        let tables = self.tables.read().await;
        let mut counts = PresenceCounts::default();
        for student in tables.students.iter().filter(|s| matches_owner(filter, s.id)) {
            counts.total += 1;
            match student.status {
                StudentStatus::In => counts.students_in += 1,
                StudentStatus::Out => counts.students_out += 1,
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl RoomStore for MemoryStore {
    async fn insert(&self, input: &CreateRoom) -> StoreResult<Room> {
        let mut tables = self.tables.write().await;
        if tables.rooms.iter().any(|r| r.room_number == input.room_number) {
            return Err(StoreError::UniqueViolation(UQ_ROOM_NUMBER.into()));
        }
        let now = Utc::now();
        let room = Room {
            id: new_id(),
            room_number: input.room_number.clone(),
            floor: input.floor,
            capacity: input.capacity,
            occupied: 0,
            status: RoomStatus::Available,
            created_at: now,
            updated_at: now,
        };
        tables.rooms.push(room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Room>> {
        let tables = self.tables.read().await;
        Ok(tables.rooms.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Room>> {
        let tables = self.tables.read().await;
        let mut rooms = tables.rooms.clone();
        rooms.sort_by(|a, b| a.room_number.cmp(&b.room_number));
        Ok(rooms)
    }

    async fn list_available(&self) -> StoreResult<Vec<Room>> {
        let tables = self.tables.read().await;
        let mut rooms: Vec<Room> = tables
            .rooms
            .iter()
            .filter(|r| room::is_available(r.occupied, r.capacity, r.status))
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.room_number.cmp(&b.room_number));
        Ok(rooms)
    }

    async fn update_layout(&self, id: DbId, layout: RoomLayout) -> StoreResult<Option<Room>> {
        let mut tables = self.tables.write().await;
        let Some(room) = tables
            .rooms
            .iter_mut()
            .find(|r| r.id == id && r.occupied <= layout.capacity)
        else {
            return Ok(None);
        };
        room.floor = layout.floor;
        room.capacity = layout.capacity;
        room.status = room::derive_status(room.occupied, layout.capacity, layout.under_maintenance);
        room.updated_at = Utc::now();
        Ok(Some(room.clone()))
    }

    async fn reserve_slot(&self, id: DbId) -> StoreResult<Option<Room>> {
        let mut tables = self.tables.write().await;
        let Some(room) = tables.rooms.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        let Some((occupied, status)) = room::after_allocation(room.occupied, room.capacity, room.status)
        else {
            return Ok(None);
        };
        room.occupied = occupied;
        room.status = status;
        room.updated_at = Utc::now();
        Ok(Some(room.clone()))
    }

    async fn release_slot(&self, id: DbId) -> StoreResult<Option<Room>> {
        let mut tables = self.tables.write().await;
        let Some(room) = tables.rooms.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        let Some((occupied, status)) = room::after_release(room.occupied, room.capacity, room.status) else {
            return Ok(None);
        };
        room.occupied = occupied;
        room.status = status;
        room.updated_at = Utc::now();
        Ok(Some(room.clone()))
    }

    async fn delete_if_empty(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables.rooms.iter().position(|r| r.id == id && r.occupied == 0) else {
            return Ok(false);
        };
        tables.rooms.remove(pos);
        for student in tables.students.iter_mut().filter(|s| s.room_id == Some(id)) {
            student.room_id = None;
            student.room_number = None;
        }
        Ok(true)
    }

    async fn count_by_status(&self) -> StoreResult<RoomCounts> {
        let tables = self.tables.read().await;
        let mut counts = RoomCounts::default();
        for room in &tables.rooms {
            counts.total_rooms += 1;
            match room.status {
                RoomStatus::Occupied => counts.occupied_rooms += 1,
                RoomStatus::Available => counts.available_rooms += 1,
                RoomStatus::Maintenance => counts.maintenance_rooms += 1,
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl MovementStore for MemoryStore {
    async fn insert(&self, input: &NewMovement) -> StoreResult<Movement> {
        let mut tables = self.tables.write().await;
        let movement = Movement {
            id: new_id(),
            student_id: input.student_id,
            student_name: input.student_name.clone(),
            action: input.action,
            recorded_at: input.recorded_at,
            note: input.note.clone(),
        };
        tables.movements.push(movement.clone());
        Ok(movement)
    }

    async fn list(&self, filter: Option<DbId>, limit: Option<i64>) -> StoreResult<Vec<Movement>> {
        let tables = self.tables.read().await;
        let rows: Vec<Movement> = tables
            .movements
            .iter()
            .filter(|m| matches_owner(filter, m.student_id))
            .cloned()
            .collect();
        let mut movements = newest_first(rows, |m| m.recorded_at);
        if let Some(limit) = limit {
            movements.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(movements)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.movements.len();
        tables.movements.retain(|m| m.id != id);
        Ok(tables.movements.len() < before)
    }
}

#[async_trait]
impl VisitorStore for MemoryStore {
    async fn insert(&self, input: &NewVisitor) -> StoreResult<Visitor> {
        let mut tables = self.tables.write().await;
        let visitor = Visitor {
            id: new_id(),
            name: input.name.clone(),
            phone: input.phone.clone(),
            visiting_student_id: input.visiting_student_id,
            visiting_student_name: input.visiting_student_name.clone(),
            purpose: input.purpose.clone(),
            check_in: input.check_in,
            check_out: None,
            status: VisitorStatus::CheckedIn,
        };
        tables.visitors.push(visitor.clone());
        Ok(visitor)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Visitor>> {
        let tables = self.tables.read().await;
        Ok(tables.visitors.iter().find(|v| v.id == id).cloned())
    }

    async fn list(&self, host: Option<DbId>, active_only: bool) -> StoreResult<Vec<Visitor>> {
        let tables = self.tables.read().await;
        let rows: Vec<Visitor> = tables
            .visitors
            .iter()
            .filter(|v| matches_owner(host, v.visiting_student_id))
            .filter(|v| !active_only || v.status == VisitorStatus::CheckedIn)
            .cloned()
            .collect();
        Ok(newest_first(rows, |v| v.check_in))
    }

    async fn check_out(&self, id: DbId, at: Timestamp) -> StoreResult<Option<Visitor>> {
        let mut tables = self.tables.write().await;
        let Some(visitor) = tables
            .visitors
            .iter_mut()
            .find(|v| v.id == id && v.status == VisitorStatus::CheckedIn)
        else {
            return Ok(None);
        };
        visitor.status = VisitorStatus::CheckedOut;
        visitor.check_out = Some(at);
        Ok(Some(visitor.clone()))
    }

    async fn count_active(&self, host: Option<DbId>) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .visitors
            .iter()
            .filter(|v| v.status == VisitorStatus::CheckedIn && matches_owner(host, v.visiting_student_id))
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl MaintenanceStore for MemoryStore {
    async fn insert(&self, input: &NewTicket) -> StoreResult<MaintenanceTicket> {
        let mut tables = self.tables.write().await;
        let ticket = MaintenanceTicket {
            id: new_id(),
            student_id: input.student_id,
            student_name: input.student_name.clone(),
            room_number: input.room_number.clone(),
            issue_type: input.issue_type.clone(),
            description: input.description.clone(),
            status: TicketStatus::Pending,
            created_at: input.created_at,
            updated_at: input.created_at,
        };
        tables.tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<MaintenanceTicket>> {
        let tables = self.tables.read().await;
        Ok(tables.tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self, filter: Option<DbId>) -> StoreResult<Vec<MaintenanceTicket>> {
        let tables = self.tables.read().await;
        let rows: Vec<MaintenanceTicket> = tables
            .tickets
            .iter()
            .filter(|t| matches_owner(filter, t.student_id))
            .cloned()
            .collect();
        Ok(newest_first(rows, |t| t.created_at))
    }

    async fn set_status(
        &self,
        id: DbId,
        status: TicketStatus,
        at: Timestamp,
    ) -> StoreResult<Option<MaintenanceTicket>> {
        let mut tables = self.tables.write().await;
        let Some(ticket) = tables.tickets.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        ticket.status = status;
        ticket.updated_at = at;
        Ok(Some(ticket.clone()))
    }

    async fn count_with_status(&self, status: TicketStatus, filter: Option<DbId>) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .tickets
            .iter()
            .filter(|t| t.status == status && matches_owner(filter, t.student_id))
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl FeeStore for MemoryStore {
    async fn insert(&self, input: &NewFee) -> StoreResult<FeeRecord> {
        let mut tables = self.tables.write().await;
        let record = FeeRecord {
            id: new_id(),
            student_id: input.student_id,
            student_name: input.student_name.clone(),
            fee_type: input.fee_type.clone(),
            amount: input.amount,
            due_date: input.due_date,
            status: FeeStatus::Pending,
            paid_date: None,
            created_at: input.created_at,
        };
        tables.fees.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<FeeRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.fees.iter().find(|f| f.id == id).cloned())
    }

    async fn list(&self, filter: Option<DbId>) -> StoreResult<Vec<FeeRecord>> {
        let tables = self.tables.read().await;
        let rows: Vec<FeeRecord> = tables
            .fees
            .iter()
            .filter(|f| matches_owner(filter, f.student_id))
            .cloned()
            .collect();
        Ok(newest_first(rows, |f| f.created_at))
    }

    async fn list_overdue(&self, now: Timestamp, filter: Option<DbId>) -> StoreResult<Vec<FeeRecord>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<FeeRecord> = tables
            .fees
            .iter()
            .filter(|f| fee::is_overdue(f.status, f.due_date, now) && matches_owner(filter, f.student_id))
            .cloned()
            .collect();
        rows.sort_by_key(|f| f.due_date);
        Ok(rows)
    }

    async fn mark_paid(&self, id: DbId, at: Timestamp) -> StoreResult<Option<FeeRecord>> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables
            .fees
            .iter_mut()
            .find(|f| f.id == id && f.status != FeeStatus::Paid)
        else {
            return Ok(None);
        };
        record.status = FeeStatus::Paid;
        record.paid_date = Some(at);
        Ok(Some(record.clone()))
    }

    async fn mark_overdue(&self, now: Timestamp) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let mut marked = 0;
        for record in tables
            .fees
            .iter_mut()
            .filter(|f| fee::needs_overdue_mark(f.status, f.due_date, now))
        {
            record.status = FeeStatus::Overdue;
            marked += 1;
        }
        Ok(marked)
    }

    async fn count_overdue(&self, now: Timestamp, filter: Option<DbId>) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .fees
            .iter()
            .filter(|f| fee::is_overdue(f.status, f.due_date, now) && matches_owner(filter, f.student_id))
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == input.username) {
            return Err(StoreError::UniqueViolation(UQ_USERNAME.into()));
        }
        if tables.users.iter().any(|u| u.email == input.email) {
            return Err(StoreError::UniqueViolation(UQ_USER_EMAIL.into()));
        }
        if let Some(code) = &input.student_code {
            if tables.users.iter().any(|u| u.student_code.as_ref() == Some(code)) {
                return Err(StoreError::UniqueViolation(UQ_USER_STUDENT_CODE.into()));
            }
        }
        let user = User {
            id: new_id(),
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role,
            full_name: input.full_name.clone(),
            phone: input.phone.clone(),
            student_code: input.student_code.clone(),
            created_at: Utc::now(),
            last_login_at: None,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn record_login(&self, id: DbId, at: Timestamp) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }
}
