//! Repository for the `students` table.

use async_trait::async_trait;
use hostel_core::student::StudentStatus;
use hostel_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::student::{CreateStudent, PresenceCounts, RoomAssignment, Student, UpdateStudent};
use crate::store::StudentStore;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, student_id, room_id, room_number, status, \
                       created_at, last_seen, updated_at";

pub struct StudentRepo {
    pool: PgPool,
}

impl StudentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for StudentRepo {
    async fn insert(&self, input: &CreateStudent) -> StoreResult<Student> {
        let query = format!(
            "INSERT INTO students (name, email, phone, student_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.student_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(student)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Student>> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn find_by_code(&self, student_code: &str) -> StoreResult<Option<Student>> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE student_id = $1");
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(student_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn list(&self, filter: Option<DbId>) -> StoreResult<Vec<Student>> {
        let query = format!(
            "SELECT {COLUMNS} FROM students
             WHERE ($1::uuid IS NULL OR id = $1)
             ORDER BY created_at DESC"
        );
        let students = sqlx::query_as::<_, Student>(&query)
            .bind(filter)
            .fetch_all(&self.pool)
            .await?;
        Ok(students)
    }

    async fn update_profile(&self, id: DbId, input: &UpdateStudent) -> StoreResult<Option<Student>> {
        let query = format!(
            "UPDATE students SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Student>> {
        let query = format!("DELETE FROM students WHERE id = $1 RETURNING {COLUMNS}");
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn assign_room(&self, id: DbId, assignment: &RoomAssignment) -> StoreResult<Option<Student>> {
        let query = format!(
            "UPDATE students SET room_id = $2, room_number = $3, updated_at = now()
             WHERE id = $1 AND room_id IS NULL
             RETURNING {COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(assignment.room_id)
            .bind(&assignment.room_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn clear_room(&self, id: DbId, room_id: DbId) -> StoreResult<Option<Student>> {
        let query = format!(
            "UPDATE students SET room_id = NULL, room_number = NULL, updated_at = now()
             WHERE id = $1 AND room_id = $2
             RETURNING {COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn set_presence(
        &self,
        id: DbId,
        status: StudentStatus,
        seen_at: Timestamp,
    ) -> StoreResult<Option<Student>> {
        let query = format!(
            "UPDATE students SET status = $2, last_seen = $3, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(seen_at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn count_presence(&self, filter: Option<DbId>) -> StoreResult<PresenceCounts> {
        let counts = sqlx::query_as::<_, PresenceCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'in') AS students_in,
                    COUNT(*) FILTER (WHERE status = 'out') AS students_out
             FROM students
             WHERE ($1::uuid IS NULL OR id = $1)",
        )
        .bind(filter)
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }
}
