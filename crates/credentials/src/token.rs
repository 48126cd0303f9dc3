//! Signed bearer tokens (HS256 JWT).

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CredentialError, Result};

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
}

/// Issues and verifies bearer tokens.
#[derive(Clone)]
pub struct CredentialService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl CredentialService {
    /// Validity window used unless configured otherwise.
    pub const DEFAULT_TTL_HOURS: i64 = 72;

    pub fn default_ttl() -> Duration {
        Duration::hours(Self::DEFAULT_TTL_HOURS)
    }

    /// Create a service signing with `secret`; tokens live for `ttl`.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a token for `user_id`, expiring `ttl` from now.
    pub fn issue(&self, user_id: &str) -> Result<String> {
        self.issue_at(user_id, Utc::now())
    }

    fn issue_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<String> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| CredentialError::Encoding("token expiry out of range".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| CredentialError::Encoding(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// This does not check that the subject still exists.
    pub fn verify(&self, token: &str) -> Result<String> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "Token rejected");
            CredentialError::Invalid
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(CredentialError::Invalid);
        }

        Ok(data.claims.sub)
    }
}
