//! Identity token codec (HS256 JWT).
//!
//! - `issue`: subject id + email → signed token, expiring `ttl` after issuance
//! - `verify`: token → typed claims, or `AuthError`
//!
//! Stateless apart from the process-wide signing secret.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

/// Claims carried by every identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: i64::try_from(ttl_seconds)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
        }
    }

    pub fn issue(&self, subject_id: &str, email: &str) -> jsonwebtoken::errors::Result<String> {
        self.issue_at(subject_id, email, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        subject_id: &str,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> jsonwebtoken::errors::Result<String> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| ErrorKind::MissingRequiredClaim("exp".to_string()))?;

        let claims = TokenClaims {
            sub: subject_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed,
            })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AuthError::Malformed);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-secret", 3600)
    }

    #[test]
    fn verify_accepts_fresh_token() {
        let codec = codec();
        let token = codec.issue("user-123", "johndoe@example.com").unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email, "johndoe@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn verify_rejects_expired_token() {
        let codec = codec();
        let issued_at = Utc::now() - Duration::hours(2);
        let token = codec
            .issue_at("user-123", "johndoe@example.com", issued_at)
            .unwrap();

        assert_eq!(codec.verify(&token), Err(AuthError::Expired));
    }

    #[test]
    fn verify_rejects_token_signed_with_other_secret() {
        let token = TokenCodec::new(b"other-secret", 3600)
            .issue("user-123", "johndoe@example.com")
            .unwrap();

        assert_eq!(codec().verify(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let codec = codec();
        let token = codec.issue("user-123", "johndoe@example.com").unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();

        let forged = TokenClaims {
            sub: "user-456".into(),
            email: "johndoe@example.com".into(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let forged = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        parts[1] = &forged;

        assert_eq!(
            codec.verify(&parts.join(".")),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn oversized_ttl_fails_issue_instead_of_panicking() {
        for ttl in [u64::MAX, 10_000_000_000_000_000, 9_000_000_000_000] {
            let codec = TokenCodec::new(b"test-secret", ttl);
            assert!(codec.issue("user-123", "johndoe@example.com").is_err(), "ttl {ttl}");
        }
    }

    #[test]
    fn verify_rejects_garbage() {
        assert_eq!(codec().verify("not-a-token"), Err(AuthError::Malformed));
        assert_eq!(codec().verify(""), Err(AuthError::Malformed));
    }
}
