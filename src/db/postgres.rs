//! PostgreSQL store implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppResult, AuthError};
use crate::models::{Pet, User};

use super::{CredentialStore, DbPool, PetStore, RevocationLedger};

const USER_COLUMNS: &str = "id, email, password_hash, admin, registered_on";

pub struct PgCredentialStore {
    pool: DbPool,
}

impl PgCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<User> {
        // The unique index on email is the authoritative duplicate guard:
        // a registration that loses the race gets no row back, not an error.
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, password_hash, admin, registered_on
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or_else(|| AuthError::AlreadyRegistered.into())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1",
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

pub struct PgRevocationLedger {
    pool: DbPool,
}

impl PgRevocationLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationLedger for PgRevocationLedger {
    async fn revoke(&self, token: &str, now: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (token, revoked_at)
            VALUES ($1, $2)
            ON CONFLICT (token) DO NOTHING
            "#,
        )
        .bind(token)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT 1::bigint FROM revoked_tokens WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.is_some())
    }
}

pub struct PgPetStore {
    pool: DbPool,
}

impl PgPetStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const PET_COLUMNS: &str =
    "id, name, date_of_birth, species, breed, sex, colour_and_identifying_marks, photo";

#[async_trait]
impl PetStore for PgPetStore {
    async fn list(&self) -> AppResult<Vec<Pet>> {
        let rows =
            sqlx::query_as::<_, Pet>(&format!("SELECT {PET_COLUMNS} FROM pets ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Pet>> {
        let row =
            sqlx::query_as::<_, Pet>(&format!("SELECT {PET_COLUMNS} FROM pets WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }
}
