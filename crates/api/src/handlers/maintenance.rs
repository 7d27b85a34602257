//! Handlers for `/maintenance` tickets.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hostel_core::types::DbId;
use hostel_db::models::maintenance::{CreateTicket, UpdateTicketStatus};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireWarden;
use crate::response::DataResponse;
use crate::services::maintenance;
use crate::state::AppState;

/// GET /api/maintenance
pub async fn list_tickets(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = maintenance::list_tickets(&state.stores, auth.scope()).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/maintenance
///
/// Wardens may open tickets for anyone; students only for themselves.
pub async fn create_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTicket>,
) -> AppResult<impl IntoResponse> {
    let data = maintenance::create_ticket(&state.stores, auth.scope(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// PUT /api/maintenance/{id}/status
pub async fn update_status(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTicketStatus>,
) -> AppResult<impl IntoResponse> {
    let data = maintenance::update_status(&state.stores, id, &input.status).await?;
    Ok(Json(DataResponse { data }))
}
