use axum::routing::{get, post};
use axum::Router;

use crate::handlers::visitors;
use crate::state::AppState;

/// Routes mounted at `/visitors`.
///
/// ```text
/// GET  /               -> list_visitors
/// POST /               -> check_in
/// GET  /active         -> list_active
/// POST /{id}/checkout  -> check_out
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(visitors::list_visitors).post(visitors::check_in))
        .route("/active", get(visitors::list_active))
        .route("/{id}/checkout", post(visitors::check_out))
}
