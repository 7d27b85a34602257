//! Handlers for the `/fees` ledger.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use hostel_core::types::DbId;
use hostel_db::models::fee::CreateFee;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireWarden;
use crate::response::DataResponse;
use crate::services::fees;
use crate::state::AppState;

/// Result of `POST /fees/refresh-overdue`.
#[derive(Debug, Serialize)]
pub struct RefreshOverdueResponse {
    pub marked: u64,
}

/// GET /api/fees
pub async fn list_fees(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = fees::list_fees(&state.stores, auth.scope()).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/fees
pub async fn create_fee(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateFee>,
) -> AppResult<impl IntoResponse> {
    let data = fees::create_fee(&state.stores, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/fees/overdue
///
/// Computed at request time; does not persist the overdue status.
pub async fn list_overdue(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = fees::list_overdue(&state.stores, auth.scope(), Utc::now()).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/fees/refresh-overdue
pub async fn refresh_overdue(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let marked = fees::refresh_overdue(&state.stores, Utc::now()).await?;
    Ok(Json(DataResponse {
        data: RefreshOverdueResponse { marked },
    }))
}

/// POST /api/fees/{id}/pay
pub async fn pay(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let data = fees::pay(&state.stores, id).await?;
    Ok(Json(DataResponse { data }))
}
