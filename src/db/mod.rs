//! Storage layer: store traits plus PostgreSQL and in-memory backends.
//!
//! The auth service never talks to a concrete backend; it receives
//! `Arc<dyn CredentialStore>` / `Arc<dyn RevocationLedger>` at construction.
//! Production wires the Postgres stores, tests the in-memory ones.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Pet, User};

pub use memory::{MemoryCredentialStore, MemoryPetStore, MemoryRevocationLedger};
pub use postgres::{PgCredentialStore, PgPetStore, PgRevocationLedger};

pub type DbPool = sqlx::PgPool;

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Persistence of user identities.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persists a new user with `admin = false`. Fails with
    /// `AuthError::AlreadyRegistered` when the email is already taken;
    /// implementations must make the check-and-insert atomic so a lost
    /// concurrent race surfaces the same way instead of as a second row.
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<User>;

    /// Exact-match lookup, no case folding.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
}

/// Deny-list of tokens invalidated before their natural expiry.
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Records the raw token string. Revoking an already revoked token is a
    /// no-op, never an error.
    async fn revoke(&self, token: &str, now: DateTime<Utc>) -> AppResult<()>;

    /// Exact-string membership test.
    async fn is_revoked(&self, token: &str) -> AppResult<bool>;
}

/// Read-only access to the pet registry.
#[async_trait]
pub trait PetStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Pet>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Pet>>;
}
