//! Handlers for the `/rooms` resource, including allocation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hostel_core::types::DbId;
use hostel_db::models::room::{CreateRoom, UpdateRoom};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{RequireAuth, RequireWarden};
use crate::response::DataResponse;
use crate::services::rooms;
use crate::state::AppState;

/// GET /api/rooms
pub async fn list_rooms(_auth: RequireAuth, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = rooms::list_rooms(&state.stores).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/rooms/available
pub async fn list_available(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let data = rooms::list_available(&state.stores).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/rooms
pub async fn create_room(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRoom>,
) -> AppResult<impl IntoResponse> {
    let data = rooms::create_room(&state.stores, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/rooms/{id}
pub async fn get_room(
    _auth: RequireAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let data = rooms::get_room(&state.stores, id).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/rooms/{id}
pub async fn update_room(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateRoom>,
) -> AppResult<impl IntoResponse> {
    let data = rooms::update_room(&state.stores, id, &input).await?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/rooms/{id}
pub async fn delete_room(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    rooms::delete_room(&state.stores, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/rooms/{id}/allocate/{student_id}
pub async fn allocate(
    RequireWarden(warden): RequireWarden,
    State(state): State<AppState>,
    AppPath((room_id, student_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let data = rooms::allocate(&state.stores, room_id, student_id).await?;
    tracing::debug!(%room_id, %student_id, user_id = %warden.user_id, "Allocation requested by warden");
    Ok(Json(DataResponse { data }))
}

/// POST /api/rooms/{id}/vacate/{student_id}
pub async fn vacate(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppPath((room_id, student_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let data = rooms::vacate(&state.stores, room_id, student_id).await?;
    Ok(Json(DataResponse { data }))
}
