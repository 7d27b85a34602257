//! Handlers for the `/students` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hostel_core::types::DbId;
use hostel_db::models::student::{CreateStudent, UpdateStudent};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireWarden;
use crate::response::DataResponse;
use crate::services::students;
use crate::state::AppState;

/// GET /api/students
///
/// Wardens see every student; students see only their own record.
pub async fn list_students(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = students::list_students(&state.stores, auth.scope()).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/students
pub async fn create_student(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateStudent>,
) -> AppResult<impl IntoResponse> {
    let data = students::create_student(&state.stores, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/students/{id}
pub async fn get_student(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let data = students::get_student(&state.stores, auth.scope(), id).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/students/{id}
///
/// Accepts `name`, `email` and `phone` only.
pub async fn update_student(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateStudent>,
) -> AppResult<impl IntoResponse> {
    let data = students::update_student(&state.stores, id, &input).await?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/students/{id}
pub async fn delete_student(
    RequireWarden(warden): RequireWarden,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    students::delete_student(&state.stores, id).await?;
    tracing::info!(student_id = %id, user_id = %warden.user_id, "Student deleted by warden");
    Ok(StatusCode::NO_CONTENT)
}
