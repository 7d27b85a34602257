//! Request extractors whose rejections use the [`AppError`] JSON shape.
//!
//! Axum's stock `Json`, `Path` and `Query` reject with plain-text bodies and
//! a mix of 400/415/422 statuses; these wrappers report every malformed
//! request as a 400 `VALIDATION_ERROR`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameter extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query string extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
