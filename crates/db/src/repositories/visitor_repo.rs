//! Repository for the `visitors` table.

use async_trait::async_trait;
use hostel_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::visitor::{NewVisitor, Visitor};
use crate::store::VisitorStore;

const COLUMNS: &str = "id, name, phone, visiting_student_id, visiting_student_name, purpose, \
                       check_in, check_out, status";

pub struct VisitorRepo {
    pool: PgPool,
}

impl VisitorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitorStore for VisitorRepo {
    async fn insert(&self, input: &NewVisitor) -> StoreResult<Visitor> {
        let query = format!(
            "INSERT INTO visitors
                (name, phone, visiting_student_id, visiting_student_name, purpose, check_in)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let visitor = sqlx::query_as::<_, Visitor>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(input.visiting_student_id)
            .bind(&input.visiting_student_name)
            .bind(&input.purpose)
            .bind(input.check_in)
            .fetch_one(&self.pool)
            .await?;
        Ok(visitor)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Visitor>> {
        let query = format!("SELECT {COLUMNS} FROM visitors WHERE id = $1");
        let visitor = sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(visitor)
    }

    async fn list(&self, host: Option<DbId>, active_only: bool) -> StoreResult<Vec<Visitor>> {
        let query = format!(
            "SELECT {COLUMNS} FROM visitors
             WHERE ($1::uuid IS NULL OR visiting_student_id = $1)
               AND (NOT $2 OR status = 'checked_in')
             ORDER BY check_in DESC"
        );
        let visitors = sqlx::query_as::<_, Visitor>(&query)
            .bind(host)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;
        Ok(visitors)
    }

    async fn check_out(&self, id: DbId, at: Timestamp) -> StoreResult<Option<Visitor>> {
        let query = format!(
            "UPDATE visitors SET status = 'checked_out', check_out = $2
             WHERE id = $1 AND status = 'checked_in'
             RETURNING {COLUMNS}"
        );
        let visitor = sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .bind(at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(visitor)
    }

    async fn count_active(&self, host: Option<DbId>) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM visitors
             WHERE status = 'checked_in' AND ($1::uuid IS NULL OR visiting_student_id = $1)",
        )
        .bind(host)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
