// src/utils/jwt.rs

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, models::admin::AdminIdentity};

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject - Stores the Admin ID.
    pub sub: String,
    pub username: String,
    /// Expiration time as Unix timestamp (seconds).
    pub exp: i64,
}

/// Decoded, live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub admin: AdminIdentity,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates stateless session tokens.
///
/// Tokens are HS256-signed, so holders cannot mint admin sessions themselves.
/// Validity is a pure function of the token string and the clock; there is no
/// revocation list.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: i64::try_from(ttl_seconds)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
        }
    }

    pub fn issue(&self, identity: &AdminIdentity) -> Result<(String, DateTime<Utc>), AppError> {
        self.issue_at(identity, Utc::now())
    }

    /// Signs a token for `identity` expiring `ttl` after `now`.
    pub fn issue_at(
        &self,
        identity: &AdminIdentity,
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalServerError("Token lifetime overflows".to_string()))?;
        let claims = Claims {
            sub: identity.id.clone(),
            username: identity.username.clone(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        Ok((token, expires_at))
    }

    pub fn decode(&self, token: &str) -> Option<SessionClaims> {
        self.decode_at(token, Utc::now())
    }

    /// Returns `None` for malformed or forged tokens, and for tokens whose
    /// expiry is at or before `now`.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Option<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the caller's clock, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .ok()?
            .claims;

        if claims.exp <= now.timestamp() {
            return None;
        }

        let expires_at = Utc.timestamp_opt(claims.exp, 0).single()?;

        Some(SessionClaims {
            admin: AdminIdentity {
                id: claims.sub,
                username: claims.username,
            },
            expires_at,
        })
    }
}
