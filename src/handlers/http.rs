//! Shared application state and the liveness probe.

use std::sync::Arc;

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::auth::AuthService;
use crate::db::PetStore;

/// Shared application state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub pets: Arc<dyn PetStore>,
    pub hide_resources: bool,
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "petgate" })),
    )
}
