use axum::routing::{get, post};
use axum::Router;

use crate::handlers::fees;
use crate::state::AppState;

/// Routes mounted at `/fees`.
///
/// ```text
/// GET  /                 -> list_fees
/// POST /                 -> create_fee
/// GET  /overdue          -> list_overdue
/// POST /refresh-overdue  -> refresh_overdue
/// POST /{id}/pay         -> pay
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fees::list_fees).post(fees::create_fee))
        .route("/overdue", get(fees::list_overdue))
        .route("/refresh-overdue", post(fees::refresh_overdue))
        .route("/{id}/pay", post(fees::pay))
}
