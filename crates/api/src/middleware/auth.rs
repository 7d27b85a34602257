//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hostel_core::roles::{RecordScope, Role};
use hostel_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, resolved from a Bearer token in the `Authorization`
/// header.
///
/// The user row is re-read on every request, so a deleted account loses
/// access immediately and the role always reflects the stored value. For
/// student accounts the linked Student record is resolved through the
/// account's student code.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    pub role: Role,
    /// Student record linked to a student account, if one exists yet.
    pub student_id: Option<DbId>,
}

impl AuthUser {
    /// Which student-owned records this caller may see.
    pub fn scope(&self) -> RecordScope {
        RecordScope::for_role(self.role, self.student_id)
    }

    pub fn is_warden(&self) -> bool {
        self.role == Role::Warden
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or_else(|| {
                AppError::unauthorized("Invalid Authorization format. Expected: Bearer <token>")
            })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        let user = state
            .stores
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        let student_id = match (user.role, user.student_code.as_deref()) {
            (Role::Student, Some(code)) => state
                .stores
                .students
                .find_by_code(code)
                .await?
                .map(|student| student.id),
            _ => None,
        };

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
            role: user.role,
            student_id,
        })
    }
}
