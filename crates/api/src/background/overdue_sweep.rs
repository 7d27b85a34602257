//! Periodic promotion of pending fees past their due date to `overdue`.
//!
//! Queries already treat unpaid, past-due fees as overdue; this job keeps
//! the stored status in line so exports and direct reads agree.

use std::time::Duration;

use chrono::Utc;
use hostel_db::Stores;
use tokio_util::sync::CancellationToken;

use crate::services::fees;

/// Run the overdue sweep loop until `cancel` is triggered.
///
/// The first tick fires immediately, so a restart catches up at once.
pub async fn run(stores: Stores, period: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = period.as_secs(), "Overdue fee sweep started");

    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Overdue fee sweep stopping");
                break;
            }
            _ = interval.tick() => {
                match fees::refresh_overdue(&stores, Utc::now()).await {
                    Ok(marked) if marked > 0 => {
                        tracing::info!(marked, "Overdue sweep: marked fees overdue");
                    }
                    Ok(_) => tracing::debug!("Overdue sweep: nothing to mark"),
                    Err(e) => tracing::error!(error = %e, "Overdue sweep failed"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;
    use hostel_core::fee::FeeStatus;
    use hostel_db::models::fee::CreateFee;

    use super::*;
    use crate::services::test_support;

    #[tokio::test]
    async fn sweep_marks_past_due_fees_then_stops_on_cancel() {
        let stores = Stores::in_memory();
        let student = test_support::student(&stores, "S-100").await;
        let fee = fees::create_fee(
            &stores,
            &CreateFee {
                student_id: student.id,
                student_name: None,
                fee_type: "rent".into(),
                amount: 1200.0,
                due_date: Utc::now() - ChronoDuration::days(3),
            },
        )
        .await
        .unwrap();

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(
            stores.clone(),
            Duration::from_secs(3600),
            cancel.clone(),
        ));

        let mut status = FeeStatus::Pending;
        for _ in 0..50 {
            status = stores.fees.find_by_id(fee.id).await.unwrap().unwrap().status;
            if status == FeeStatus::Overdue {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(status, FeeStatus::Overdue);

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweep should stop after cancel")
            .unwrap();
    }
}
