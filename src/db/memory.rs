//! In-memory stores for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppResult, AuthError};
use crate::models::{Pet, User};

use super::{CredentialStore, PetStore, RevocationLedger};

#[derive(Default)]
pub struct MemoryCredentialStore {
    // Keyed by email; the write lock makes check-and-insert atomic.
    users: RwLock<HashMap<String, User>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test teardown helper: drops a user without touching issued tokens.
    pub async fn remove(&self, id: Uuid) {
        self.users.write().await.retain(|_, u| u.id != id);
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(AuthError::AlreadyRegistered.into());
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            admin: false,
            registered_on: Utc::now(),
        };
        users.insert(email.to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.id == id)
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryRevocationLedger {
    tokens: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl MemoryRevocationLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationLedger for MemoryRevocationLedger {
    async fn revoke(&self, token: &str, now: DateTime<Utc>) -> AppResult<()> {
        // Keep the first revocation time if the token shows up twice.
        self.tokens
            .write()
            .await
            .entry(token.to_string())
            .or_insert(now);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        Ok(self.tokens.read().await.contains_key(token))
    }
}

#[derive(Default)]
pub struct MemoryPetStore {
    pets: RwLock<Vec<Pet>>,
}

impl MemoryPetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(pets: Vec<Pet>) -> Self {
        Self {
            pets: RwLock::new(pets),
        }
    }
}

#[async_trait]
impl PetStore for MemoryPetStore {
    async fn list(&self) -> AppResult<Vec<Pet>> {
        Ok(self.pets.read().await.clone())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Pet>> {
        Ok(self.pets.read().await.iter().find(|p| p.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let store = MemoryCredentialStore::new();
        store.create("a@example.com", "hash").await.unwrap();
        let err = store.create("a@example.com", "hash2").await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Auth(AuthError::AlreadyRegistered)
        ));
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let store = MemoryCredentialStore::new();
        store.create("Dog@example.com", "hash").await.unwrap();
        assert!(store.find_by_email("dog@example.com").await.unwrap().is_none());
        assert!(store.find_by_email("Dog@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn revoke_is_idempotent() {
        let ledger = MemoryRevocationLedger::new();
        let now = Utc::now();
        assert!(!ledger.is_revoked("tok").await.unwrap());
        ledger.revoke("tok", now).await.unwrap();
        ledger.revoke("tok", now).await.unwrap();
        assert!(ledger.is_revoked("tok").await.unwrap());
        assert!(!ledger.is_revoked("other").await.unwrap());
    }
}
