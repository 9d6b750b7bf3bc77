//! Middleware: bearer-token extractor for protected routes and the
//! visibility layer for toggleable endpoints.

pub mod auth;

pub use auth::{bearer_token, hide_when_disabled, AuthUser};
