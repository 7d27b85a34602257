//! Repository for the `fee_records` table.

use async_trait::async_trait;
use hostel_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::fee::{FeeRecord, NewFee};
use crate::store::FeeStore;

const COLUMNS: &str = "id, student_id, student_name, fee_type, amount, due_date, status, \
                       paid_date, created_at";

pub struct FeeRepo {
    pool: PgPool,
}

impl FeeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeeStore for FeeRepo {
    async fn insert(&self, input: &NewFee) -> StoreResult<FeeRecord> {
        let query = format!(
            "INSERT INTO fee_records (student_id, student_name, fee_type, amount, due_date, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let fee = sqlx::query_as::<_, FeeRecord>(&query)
            .bind(input.student_id)
            .bind(&input.student_name)
            .bind(&input.fee_type)
            .bind(input.amount)
            .bind(input.due_date)
            .bind(input.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(fee)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<FeeRecord>> {
        let query = format!("SELECT {COLUMNS} FROM fee_records WHERE id = $1");
        let fee = sqlx::query_as::<_, FeeRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fee)
    }

    async fn list(&self, filter: Option<DbId>) -> StoreResult<Vec<FeeRecord>> {
        let query = format!(
            "SELECT {COLUMNS} FROM fee_records
             WHERE ($1::uuid IS NULL OR student_id = $1)
             ORDER BY created_at DESC"
        );
        let fees = sqlx::query_as::<_, FeeRecord>(&query)
            .bind(filter)
            .fetch_all(&self.pool)
            .await?;
        Ok(fees)
    }

    async fn list_overdue(&self, now: Timestamp, filter: Option<DbId>) -> StoreResult<Vec<FeeRecord>> {
        let query = format!(
            "SELECT {COLUMNS} FROM fee_records
             WHERE status <> 'paid' AND due_date < $1
               AND ($2::uuid IS NULL OR student_id = $2)
             ORDER BY due_date ASC"
        );
        let fees = sqlx::query_as::<_, FeeRecord>(&query)
            .bind(now)
            .bind(filter)
            .fetch_all(&self.pool)
            .await?;
        Ok(fees)
    }

    async fn mark_paid(&self, id: DbId, at: Timestamp) -> StoreResult<Option<FeeRecord>> {
        let query = format!(
            "UPDATE fee_records SET status = 'paid', paid_date = $2
             WHERE id = $1 AND status <> 'paid'
             RETURNING {COLUMNS}"
        );
        let fee = sqlx::query_as::<_, FeeRecord>(&query)
            .bind(id)
            .bind(at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fee)
    }

    async fn mark_overdue(&self, now: Timestamp) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE fee_records SET status = 'overdue'
             WHERE status = 'pending' AND due_date < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn count_overdue(&self, now: Timestamp, filter: Option<DbId>) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM fee_records
             WHERE status <> 'paid' AND due_date < $1
               AND ($2::uuid IS NULL OR student_id = $2)",
        )
        .bind(now)
        .bind(filter)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
