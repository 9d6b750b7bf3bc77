//! JWT issue and decode.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult, AuthError};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    /// Admin flag at issuance time; never re-checked against live state.
    pub admin: bool,
}

/// HS256 codec over a server-held secret. Issuing and decoding are pure
/// computations; the caller supplies the clock.
#[derive(Clone)]
pub struct JwtCodec {
    secret: String,
    ttl: Duration,
}

impl JwtCodec {
    pub fn new(secret: String, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    pub fn issue(&self, subject: Uuid, admin: bool, now: DateTime<Utc>) -> AppResult<String> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
            admin,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("token encode: {}", e)))
    }

    /// Verifies the signature and the expiry instant. A token is expired
    /// strictly after `exp`; at `exp` itself it still decodes.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        // Expiry is checked below against the supplied clock, with no
        // leeway, so the library's wall-clock check is turned off.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => AuthError::BadSignature,
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::MalformedToken,
        })?;

        if now.timestamp() > data.claims.exp {
            return Err(AuthError::Expired);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn codec() -> JwtCodec {
        JwtCodec::new("test-secret-key-12345".to_string(), Duration::seconds(60))
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn issue_then_decode_round_trip() {
        let codec = codec();
        let now = issued_at();
        let subject = Uuid::new_v4();

        let token = codec.issue(subject, false, now).unwrap();
        let claims = codec.decode(&token, now).unwrap();

        assert_eq!(claims.sub, subject.to_string());
        assert!(!claims.admin);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 60);
    }

    #[test]
    fn admin_claim_survives_round_trip() {
        let codec = codec();
        let now = issued_at();
        let token = codec.issue(Uuid::new_v4(), true, now).unwrap();
        assert!(codec.decode(&token, now).unwrap().admin);
    }

    #[test]
    fn decode_after_expiry_fails() {
        let codec = codec();
        let now = issued_at();
        let token = codec.issue(Uuid::new_v4(), false, now).unwrap();

        let err = codec
            .decode(&token, now + Duration::seconds(61))
            .unwrap_err();
        assert_eq!(err, AuthError::Expired);
    }

    #[test]
    fn decode_one_tick_before_expiry_succeeds() {
        let codec = codec();
        let now = issued_at();
        let token = codec.issue(Uuid::new_v4(), false, now).unwrap();

        assert!(codec.decode(&token, now + Duration::seconds(59)).is_ok());
        // The expiry instant itself is still valid; only after it is not.
        assert!(codec.decode(&token, now + Duration::seconds(60)).is_ok());
    }

    #[test]
    fn tampered_signature_is_bad_signature_not_malformed() {
        let codec = codec();
        let token = codec.issue(Uuid::new_v4(), false, issued_at()).unwrap();

        // Flip the first character of the signature segment. The string
        // still parses as a JWT, so the failure must be the signature check.
        let dot = token.rfind('.').unwrap();
        let mut tampered: Vec<char> = token.chars().collect();
        tampered[dot + 1] = if tampered[dot + 1] == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();
        assert_ne!(tampered, token);

        let err = codec.decode(&tampered, issued_at()).unwrap_err();
        assert_eq!(err, AuthError::BadSignature);
    }

    #[test]
    fn garbage_token_is_malformed() {
        let err = codec()
            .decode("some-random-strings", issued_at())
            .unwrap_err();
        assert_eq!(err, AuthError::MalformedToken);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = JwtCodec::new("another-secret".to_string(), Duration::seconds(60));
        let token = other.issue(Uuid::new_v4(), false, issued_at()).unwrap();

        let err = codec().decode(&token, issued_at()).unwrap_err();
        assert_eq!(err, AuthError::BadSignature);
    }
}
