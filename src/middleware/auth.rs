//! Auth middleware: JWT extractor for protected routes; visibility toggle.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::models::AuthenticatedSubject;

/// Clients present the token in a header literally named `Bearer`.
const TOKEN_HEADER: &str = "Bearer";

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok())
}

/// Extractor: the authenticated subject behind the presented token.
/// Rejects with the full taxonomy (missing/malformed/bad-signature/expired/
/// blacklisted/unknown-subject) before the handler body runs.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub AuthenticatedSubject);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers);
        let subject = state.auth.authenticate(token, Utc::now()).await?;
        Ok(AuthUser(subject))
    }
}

/// Layered around the toggleable routes: when `HIDE_RESOURCES` is set they
/// answer with a generic not-found instead of executing the handler.
pub async fn hide_when_disabled(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.hide_resources {
        return AppError::NotFound("Sorry, resource not available.".to_string())
            .into_response();
    }
    next.run(request).await
}
