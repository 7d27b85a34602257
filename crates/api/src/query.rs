//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for "most recent N" listings. Clamped by the service.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
