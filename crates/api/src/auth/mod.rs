//! Token and password primitives used by the identity service.

pub mod jwt;
pub mod password;
