//! Dashboard Aggregator.
//!
//! Issues independent counts against each collection and reduces them into
//! [`DashboardStats`]. No transaction spans the reads. Room counts are always
//! global; everything else follows the caller's record scope.

use chrono::Utc;
use hostel_core::maintenance::TicketStatus;
use hostel_core::roles::RecordScope;
use hostel_db::models::dashboard::DashboardStats;
use hostel_db::models::student::PresenceCounts;
use hostel_db::Stores;

use crate::error::AppResult;

pub async fn get_stats(stores: &Stores, scope: RecordScope) -> AppResult<DashboardStats> {
    let Some(filter) = scope.student_filter() else {
        let rooms = stores.rooms.count_by_status().await?;
        return Ok(DashboardStats::assemble(PresenceCounts::default(), rooms, 0, 0, 0));
    };

    let now = Utc::now();
    let (rooms, presence, pending_maintenance, overdue_fees, active_visitors) = tokio::try_join!(
        stores.rooms.count_by_status(),
        stores.students.count_presence(filter),
        stores.maintenance.count_with_status(TicketStatus::Pending, filter),
        stores.fees.count_overdue(now, filter),
        stores.visitors.count_active(filter),
    )?;

    Ok(DashboardStats::assemble(
        presence,
        rooms,
        pending_maintenance,
        overdue_fees,
        active_visitors,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use hostel_db::models::fee::CreateFee;
    use hostel_db::models::movement::CreateMovement;

    use super::*;
    use crate::services::{fees, movements, rooms, test_support};

    #[tokio::test]
    async fn counts_reflect_every_collection() {
        let stores = Stores::in_memory();
        let room = test_support::room(&stores, "101", 1).await;
        test_support::room(&stores, "102", 2).await;
        let s1 = test_support::student(&stores, "S1").await;
        let s2 = test_support::student(&stores, "S2").await;
        rooms::allocate(&stores, room.id, s1.id).await.unwrap();
        movements::record_movement(
            &stores,
            &CreateMovement {
                student_id: s1.id,
                student_name: None,
                action: "check_in".into(),
                note: None,
            },
        )
        .await
        .unwrap();
        fees::create_fee(
            &stores,
            &CreateFee {
                student_id: s2.id,
                student_name: None,
                fee_type: "mess".into(),
                amount: 120.0,
                due_date: Utc::now() - Duration::days(2),
            },
        )
        .await
        .unwrap();

        let stats = get_stats(&stores, RecordScope::All).await.unwrap();
        assert_eq!(stats.total_students, 2);
        assert_eq!(stats.students_in, 1);
        assert_eq!(stats.students_out, 1);
        assert_eq!(stats.total_rooms, 2);
        assert_eq!(stats.occupied_rooms, 1);
        assert_eq!(stats.available_rooms, 1);
        assert_eq!(stats.maintenance_rooms, 0);
        assert_eq!(stats.overdue_fees, 1);
        assert_eq!(stats.pending_maintenance, 0);
        assert_eq!(stats.active_visitors, 0);

        let mine = get_stats(&stores, RecordScope::Own(s1.id)).await.unwrap();
        assert_eq!(mine.total_students, 1);
        assert_eq!(mine.overdue_fees, 0);
        assert_eq!(mine.total_rooms, 2);

        let unlinked = get_stats(&stores, RecordScope::Nothing).await.unwrap();
        assert_eq!(unlinked.total_students, 0);
        assert_eq!(unlinked.total_rooms, 2);
    }
}
