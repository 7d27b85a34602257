//! Repository for the append-only `movements` table.

use async_trait::async_trait;
use hostel_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::movement::{Movement, NewMovement};
use crate::store::MovementStore;

const COLUMNS: &str = "id, student_id, student_name, action, recorded_at, note";

pub struct MovementRepo {
    pool: PgPool,
}

impl MovementRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovementStore for MovementRepo {
    async fn insert(&self, input: &NewMovement) -> StoreResult<Movement> {
        let query = format!(
            "INSERT INTO movements (student_id, student_name, action, recorded_at, note)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let movement = sqlx::query_as::<_, Movement>(&query)
            .bind(input.student_id)
            .bind(&input.student_name)
            .bind(input.action.as_str())
            .bind(input.recorded_at)
            .bind(&input.note)
            .fetch_one(&self.pool)
            .await?;
        Ok(movement)
    }

    async fn list(&self, filter: Option<DbId>, limit: Option<i64>) -> StoreResult<Vec<Movement>> {
        // LIMIT NULL is no limit.
        let query = format!(
            "SELECT {COLUMNS} FROM movements
             WHERE ($1::uuid IS NULL OR student_id = $1)
             ORDER BY recorded_at DESC, id
             LIMIT $2"
        );
        let movements = sqlx::query_as::<_, Movement>(&query)
            .bind(filter)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(movements)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM movements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
