use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use chirpy_types::api::Claims;

pub const ISSUER: &str = "chirpy";

/// Default lifetime and hard ceiling for a session token.
pub const MAX_TTL_SECS: u64 = 86_400;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("token expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Lifetime actually granted for a requested one. No request (or zero) gets
/// the default, smaller requests are honored, larger ones are clamped.
pub fn effective_ttl(requested: Option<u64>) -> u64 {
    match requested {
        None | Some(0) => MAX_TTL_SECS,
        Some(ttl) => ttl.min(MAX_TTL_SECS),
    }
}

/// Issues and verifies HS256 session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        // Expiry is checked in verify_at against an explicit clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, subject: &str, ttl: Option<u64>) -> Result<String, TokenError> {
        self.issue_at(subject, ttl, chrono::Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds).
    pub fn issue_at(&self, subject: &str, ttl: Option<u64>, now: i64) -> Result<String, TokenError> {
        let claims = Claims {
            iss: ISSUER.to_string(),
            sub: subject.to_string(),
            iat: now,
            exp: now + effective_ttl(ttl) as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Check signature, structure and issuer, then expiry against `now`.
    /// A token is still valid at the exact `exp` second.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if now > data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(data.claims)
    }
}
