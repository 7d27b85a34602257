//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement, enforcing authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `warden` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn warden_only(RequireWarden(user): RequireWarden) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireWarden(pub AuthUser);

impl FromRequestParts<AppState> for RequireWarden {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_warden() {
            return Err(AppError::forbidden("Warden role required"));
        }
        Ok(RequireWarden(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for route
/// handlers where "this route requires authentication" should read plainly.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
