//! Bearer credential obtained from the login endpoint.
//!
//! The token is issued and signed by the REST API; this side only needs to
//! know when it stops being useful, so the `exp` claim is read without
//! checking the signature.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use serde::Deserialize;
use std::fmt;

use crate::error::{ApiError, ApiResult};
use crate::models::AuthResponse;

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

impl Credential {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Builds a credential from a login response. The expiry comes from the
    /// response, else from the token's `exp` claim, else `fallback_ttl` from now.
    pub fn from_auth(response: AuthResponse, fallback_ttl: Duration) -> Self {
        let expires_at = response
            .expires
            .or_else(|| token_expiry(&response.token))
            .unwrap_or_else(|| {
                Utc::now()
                    .checked_add_signed(fallback_ttl)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC)
            });
        Self::new(response.token, expires_at)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// The token to send, or `SessionExpired` if it can no longer be used.
    pub fn bearer(&self) -> ApiResult<&str> {
        if self.is_expired() {
            return Err(ApiError::SessionExpired);
        }
        Ok(&self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Reads the `exp` claim of a JWT. `None` when the token is not a JWT or
/// carries no expiry.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let header = decode_header(token).ok()?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;

    let data = decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::from_timestamp(data.claims.exp, 0)
}
