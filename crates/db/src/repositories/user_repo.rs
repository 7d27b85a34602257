//! Repository for the `users` table.

use async_trait::async_trait;
use hostel_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::user::{CreateUser, User};
use crate::store::UserStore;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role, full_name, phone, \
                       student_code, created_at, last_login_at";

pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn insert(&self, input: &CreateUser) -> StoreResult<User> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role, full_name, phone, student_code)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.student_code)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Find a user by username (case-sensitive).
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn record_login(&self, id: DbId, at: Timestamp) -> StoreResult<()> {
        sqlx::query("UPDATE users SET last_login_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
