//! Session tokens.
//!
//! Tokens are HMAC-signed JWTs carrying the staff identity and tenant. A token
//! is valid from its issue time up to, but not including, its expiry time.
//! There is no revocation; expiry is the only way a token stops working.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use hospital_persistence::tenant::TenantId;

use crate::error::TokenError;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Staff identifier.
    pub sub: String,
    /// Staff username.
    pub username: String,
    /// The tenant every request made with this token is scoped to.
    pub hospital_id: TenantId,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expires-at, seconds since the Unix epoch.
    pub exp: i64,
}

/// Token signing configuration.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    expiry: Duration,
}

impl TokenConfig {
    /// Creates a configuration from a signing secret and token lifetime.
    pub fn new(secret: impl Into<String>, expiry: Duration) -> Self {
        Self {
            secret: secret.into(),
            expiry,
        }
    }

    /// Token lifetime.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Issues and validates session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiry: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a token service. Tokens are signed with HS256.
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Any HMAC algorithm is accepted; anything else is rejected before
        // the signature is checked.
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);
        // The validity window is checked in `validate_at` against an explicit
        // clock, without leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expiry: config.expiry,
        }
    }

    /// Token lifetime.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Issues a token valid from now for the configured lifetime.
    pub fn issue(&self, staff_id: &str, username: &str, hospital_id: TenantId) -> Result<String, TokenError> {
        self.issue_at(staff_id, username, hospital_id, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        staff_id: &str,
        username: &str,
        hospital_id: TenantId,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = now
            .checked_add_signed(self.expiry)
            .ok_or_else(|| TokenError::Signing(format!("token lifetime {} overflows", self.expiry)))?;

        let claims = SessionClaims {
            sub: staff_id.to_string(),
            username: username.to_string(),
            hospital_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validates a token against the current time.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validates a token as if the current time were `now`.
    ///
    /// Fails with [`TokenError::Expired`] when `now >= exp`, and with
    /// [`TokenError::Invalid`] for every other failure.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            TokenError::Invalid
        })?;

        let claims = data.claims;
        let now = now.timestamp();
        if now < claims.iat {
            tracing::debug!(iat = claims.iat, now, "Rejected session token issued in the future");
            return Err(TokenError::Invalid);
        }
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
