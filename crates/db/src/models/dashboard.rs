//! Dashboard summary counts.

use serde::Serialize;

use super::room::RoomCounts;
use super::student::PresenceCounts;

/// Aggregate counts shown on the dashboard.
///
/// Each figure comes from an independent read; under concurrent writes the
/// figures may disagree with each other by a request or two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_students: i64,
    pub students_in: i64,
    pub students_out: i64,
    pub total_rooms: i64,
    pub occupied_rooms: i64,
    pub available_rooms: i64,
    pub maintenance_rooms: i64,
    pub pending_maintenance: i64,
    pub overdue_fees: i64,
    pub active_visitors: i64,
}

impl DashboardStats {
    pub fn assemble(
        presence: PresenceCounts,
        rooms: RoomCounts,
        pending_maintenance: i64,
        overdue_fees: i64,
        active_visitors: i64,
    ) -> Self {
        Self {
            total_students: presence.total,
            students_in: presence.students_in,
            students_out: presence.students_out,
            total_rooms: rooms.total_rooms,
            occupied_rooms: rooms.occupied_rooms,
            available_rooms: rooms.available_rooms,
            maintenance_rooms: rooms.maintenance_rooms,
            pending_maintenance,
            overdue_fees,
            active_visitors,
        }
    }
}
