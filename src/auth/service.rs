//! Auth service: orchestrates the credential store, token codec, and
//! revocation ledger behind register/login/logout/authenticate.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::db::{CredentialStore, RevocationLedger};
use crate::error::{AppResult, AuthError, FieldErrors};
use crate::models::{AuthenticatedSubject, User};

use super::password::{hash_password, verify_password};
use super::JwtCodec;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    revoked: Arc<dyn RevocationLedger>,
    codec: JwtCodec,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        revoked: Arc<dyn RevocationLedger>,
        codec: JwtCodec,
    ) -> Self {
        Self {
            credentials,
            revoked,
            codec,
        }
    }

    /// Creates a user and issues their first token.
    pub async fn register(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<(User, String)> {
        let (email, password) = validate_credentials(email, password)?;
        if self.credentials.find_by_email(email).await?.is_some() {
            return Err(AuthError::AlreadyRegistered.into());
        }
        let password_hash = hash_password(password)?;
        // A concurrent registration that slips past the lookup above is
        // caught by the store's uniqueness guard and reported the same way.
        let user = self.credentials.create(email, &password_hash).await?;
        let token = self.codec.issue(user.id, user.admin, now)?;
        tracing::info!(user_id = %user.id, "registered new user");
        Ok((user, token))
    }

    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<String> {
        let (email, password) = validate_credentials(email, password)?;
        let user = self
            .credentials
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }
        let token = self.codec.issue(user.id, user.admin, now)?;
        Ok(token)
    }

    /// Blacklists the raw token string. Decode failures propagate unchanged,
    /// so an expired or forged token cannot be "logged out".
    pub async fn logout(&self, token: Option<&str>, now: DateTime<Utc>) -> AppResult<()> {
        let token = token.ok_or(AuthError::MissingToken)?;
        self.codec.decode(token, now)?;
        self.revoked.revoke(token, now).await?;
        tracing::info!("token revoked on logout");
        Ok(())
    }

    /// The gate in front of protected resources. The revocation check runs
    /// only after signature and expiry pass: an unverified token carries no
    /// identity worth looking up.
    pub async fn authenticate(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<AuthenticatedSubject> {
        let token = token.ok_or(AuthError::MissingToken)?;
        let claims = self.codec.decode(token, now)?;
        if self.revoked.is_revoked(token).await? {
            return Err(AuthError::Blacklisted.into());
        }
        let subject = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::MalformedToken)?;
        let user = self
            .credentials
            .find_by_id(subject)
            .await?
            .ok_or(AuthError::UnknownSubject)?;
        Ok(AuthenticatedSubject {
            id: user.id,
            admin: claims.admin,
        })
    }
}

/// Shape validation for register/login bodies. Failures are collected per
/// field rather than reported one at a time.
fn validate_credentials<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), AuthError> {
    let mut fields = FieldErrors::new();

    match email {
        None => push(&mut fields, "email", "Email is required."),
        Some(e) if !e.validate_email() => {
            push(&mut fields, "email", "Not a valid email address.")
        }
        _ => {}
    }
    match password {
        None => push(&mut fields, "password", "Password is required."),
        Some(p) if p.chars().count() < MIN_PASSWORD_LENGTH => {
            push(&mut fields, "password", "Shorter than minimum length 8.")
        }
        _ => {}
    }

    match (email, password) {
        (Some(e), Some(p)) if fields.is_empty() => Ok((e, p)),
        _ => Err(AuthError::ValidationFailed(fields)),
    }
}

fn push(fields: &mut FieldErrors, field: &str, message: &str) {
    fields
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}
