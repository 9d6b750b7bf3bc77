//! Auth HTTP handlers: register, login, logout.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::bearer_token;

/// Body for register and login. Fields are optional so presence is checked
/// by the service, which reports all missing/invalid fields together.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (_, auth_token) = state
        .auth
        .register(body.email.as_deref(), body.password.as_deref(), Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Successfully registered.",
            "auth_token": auth_token,
        })),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<Value>, AppError> {
    let auth_token = state
        .auth
        .login(body.email.as_deref(), body.password.as_deref(), Utc::now())
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Successfully logged in.",
        "auth_token": auth_token,
    })))
}

/// POST /auth/logout — blacklists the presented token.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    state.auth.logout(bearer_token(&headers), Utc::now()).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Successfully logged out.",
    })))
}
