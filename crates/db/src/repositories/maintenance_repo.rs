//! Repository for the `maintenance_tickets` table.

use async_trait::async_trait;
use hostel_core::maintenance::TicketStatus;
use hostel_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::maintenance::{MaintenanceTicket, NewTicket};
use crate::store::MaintenanceStore;

const COLUMNS: &str = "id, student_id, student_name, room_number, issue_type, description, \
                       status, created_at, updated_at";

pub struct MaintenanceRepo {
    pool: PgPool,
}

impl MaintenanceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceStore for MaintenanceRepo {
    async fn insert(&self, input: &NewTicket) -> StoreResult<MaintenanceTicket> {
        let query = format!(
            "INSERT INTO maintenance_tickets
                (student_id, student_name, room_number, issue_type, description, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {COLUMNS}"
        );
        let ticket = sqlx::query_as::<_, MaintenanceTicket>(&query)
            .bind(input.student_id)
            .bind(&input.student_name)
            .bind(&input.room_number)
            .bind(&input.issue_type)
            .bind(&input.description)
            .bind(input.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(ticket)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<MaintenanceTicket>> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_tickets WHERE id = $1");
        let ticket = sqlx::query_as::<_, MaintenanceTicket>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ticket)
    }

    async fn list(&self, filter: Option<DbId>) -> StoreResult<Vec<MaintenanceTicket>> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_tickets
             WHERE ($1::uuid IS NULL OR student_id = $1)
             ORDER BY created_at DESC"
        );
        let tickets = sqlx::query_as::<_, MaintenanceTicket>(&query)
            .bind(filter)
            .fetch_all(&self.pool)
            .await?;
        Ok(tickets)
    }

    async fn set_status(
        &self,
        id: DbId,
        status: TicketStatus,
        at: Timestamp,
    ) -> StoreResult<Option<MaintenanceTicket>> {
        let query = format!(
            "UPDATE maintenance_tickets SET status = $2, updated_at = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let ticket = sqlx::query_as::<_, MaintenanceTicket>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ticket)
    }

    async fn count_with_status(&self, status: TicketStatus, filter: Option<DbId>) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM maintenance_tickets
             WHERE status = $1 AND ($2::uuid IS NULL OR student_id = $2)",
        )
        .bind(status.as_str())
        .bind(filter)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
