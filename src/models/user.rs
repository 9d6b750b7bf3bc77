//! User identity record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user. The password is stored only as a salted argon2 hash.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub admin: bool,
    /// Set once at creation, never updated.
    pub registered_on: DateTime<Utc>,
}

/// The identity a verified token resolves to: what protected handlers see.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedSubject {
    pub id: Uuid,
    /// Copied from the token claims, i.e. the admin flag the user had at
    /// issuance time, not the live value.
    pub admin: bool,
}
