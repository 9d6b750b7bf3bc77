//! Application error types for robust error handling.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Per-field validation messages, e.g. `{"email": ["Email is required."]}`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Authentication failures. Closed taxonomy: every variant maps to exactly
/// one status/body at the HTTP boundary.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("validation failed")]
    ValidationFailed(FieldErrors),

    #[error("user already registered")]
    AlreadyRegistered,

    #[error("user does not exist")]
    UserNotFound,

    #[error("password verification failed")]
    InvalidCredentials,

    #[error("no token supplied")]
    MissingToken,

    #[error("token cannot be decoded")]
    MalformedToken,

    #[error("token signature mismatch")]
    BadSignature,

    #[error("token expired")]
    Expired,

    #[error("token blacklisted")]
    Blacklisted,

    #[error("token subject no longer exists")]
    UnknownSubject,
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    /// Status and client-visible message. Login failures share one generic
    /// message so the response never reveals which of email/password was
    /// wrong; an unknown subject is indistinguishable from a malformed token
    /// so account deletion is not leaked either.
    fn response_parts(&self) -> (StatusCode, Value) {
        match self {
            AuthError::ValidationFailed(fields) => {
                (StatusCode::UNAUTHORIZED, json!(fields))
            }
            AuthError::AlreadyRegistered => (
                StatusCode::ACCEPTED,
                json!("User already exists. Please Log in."),
            ),
            AuthError::UserNotFound | AuthError::InvalidCredentials => (
                StatusCode::NOT_FOUND,
                json!("Sorry, email or password was incorrect."),
            ),
            AuthError::MissingToken => {
                (StatusCode::UNAUTHORIZED, json!("A valid token is missing."))
            }
            AuthError::MalformedToken | AuthError::UnknownSubject => {
                (StatusCode::UNAUTHORIZED, json!("Token is invalid."))
            }
            AuthError::BadSignature => (
                StatusCode::UNAUTHORIZED,
                json!("Token signature is invalid."),
            ),
            AuthError::Expired => {
                (StatusCode::UNAUTHORIZED, json!("Signature has expired."))
            }
            AuthError::Blacklisted => (
                StatusCode::UNAUTHORIZED,
                json!("Token blacklisted. Please log in again."),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Auth(err) => err.response_parts(),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!(msg)),
            AppError::Db(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!("Some error occurred. Please try again."),
            ),
        };

        tracing::warn!(status = status.as_u16(), error = %self, message = %message, "request failed");

        let body = Json(json!({ "status": "fail", "message": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
