//! Request handlers.
//!
//! Handlers extract the caller, path, query and body, delegate to the
//! matching service in [`crate::services`], and wrap resources in the
//! `{ "data": ... }` envelope.

pub mod auth;
pub mod dashboard;
pub mod fees;
pub mod maintenance;
pub mod movements;
pub mod rooms;
pub mod students;
pub mod visitors;
