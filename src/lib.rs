//! Pet registry REST API guarded by a token-based authentication layer.
//!
//! Stateless JWT bearer tokens with expiry, a revocation blacklist for
//! logout, and read-only pet resources behind the authentication gate.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

pub use auth::{AuthService, JwtCodec};
pub use config::Config;
pub use error::{AppError, AuthError};
pub use handlers::http::AppState;

use axum::routing::{get, post};
use handlers::{http, pets};
use middleware::hide_when_disabled;

/// Build the API router (auth, pets, health). Used by main and by
/// integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    // Register and the pet resources honor the visibility flag; login and
    // logout stay reachable so existing sessions can still be ended.
    let toggleable = axum::Router::new()
        .route("/auth/register", post(auth::register))
        .route("/pets", get(pets::list_pets))
        .route("/pet/:id", get(pets::get_pet))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            hide_when_disabled,
        ));

    axum::Router::new()
        .route("/health", get(http::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .merge(toggleable)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
