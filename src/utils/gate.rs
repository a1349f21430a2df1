// src/utils/gate.rs

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{DateTime, Utc};

use crate::{error::AppError, utils::jwt::TokenCodec};

/// What a caller wants to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    ToggleFavorite,
    /// Create, edit or delete of questions and categories.
    Write,
}

/// The mutations a caller may perform for the current call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    Denied,
    /// Anonymous callers may flip `isFavorite` and nothing else.
    FavoriteOnly,
    FullWrite,
}

impl Authority {
    /// Fails with `Unauthorized` unless this is full write authority.
    pub fn require_full_write(self) -> Result<(), AppError> {
        match self {
            Authority::FullWrite => Ok(()),
            Authority::Denied | Authority::FavoriteOnly => Err(AppError::Unauthorized(
                "Admin session required".to_string(),
            )),
        }
    }

    /// Fails with `Unauthorized` when no mutation at all is permitted.
    pub fn require_any_write(self) -> Result<(), AppError> {
        match self {
            Authority::Denied => Err(AppError::Unauthorized(
                "Admin session required".to_string(),
            )),
            Authority::FavoriteOnly | Authority::FullWrite => Ok(()),
        }
    }
}

/// Authorization gate. A fresh, pure decision on every call; the outcome is
/// always an authority level, never an error.
#[derive(Clone)]
pub struct Gate {
    codec: TokenCodec,
}

impl Gate {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn authorize(&self, token: Option<&str>, operation: Operation) -> Authority {
        self.authorize_at(token, operation, Utc::now())
    }

    pub fn authorize_at(
        &self,
        token: Option<&str>,
        operation: Operation,
        now: DateTime<Utc>,
    ) -> Authority {
        let session = token.and_then(|t| self.codec.decode_at(t, now));

        match (session, operation) {
            (Some(_), _) => Authority::FullWrite,
            (None, Operation::Read | Operation::ToggleFavorite) => Authority::FavoriteOnly,
            (None, Operation::Write) => Authority::Denied,
        }
    }
}

/// Optional `Authorization: Bearer <token>` header. Absence is a valid input.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_owned);

        Ok(BearerToken(token))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::models::admin::AdminIdentity;

    fn gate() -> Gate {
        Gate::new(TokenCodec::new("gate_test_secret", 3600))
    }

    fn admin_token(gate: &Gate, now: DateTime<Utc>) -> String {
        let identity = AdminIdentity {
            id: "a1".into(),
            username: "admin".into(),
        };
        gate.codec().issue_at(&identity, now).unwrap().0
    }

    #[test]
    fn anonymous_callers_may_only_toggle_favorites() {
        let gate = gate();
        assert_eq!(
            gate.authorize(None, Operation::ToggleFavorite),
            Authority::FavoriteOnly
        );
        assert_eq!(gate.authorize(None, Operation::Write), Authority::Denied);
    }

    #[test]
    fn invalid_token_is_treated_as_anonymous() {
        let gate = gate();
        assert_eq!(
            gate.authorize(Some("bogus"), Operation::Write),
            Authority::Denied
        );
        assert_eq!(
            gate.authorize(Some("bogus"), Operation::ToggleFavorite),
            Authority::FavoriteOnly
        );
    }

    #[test]
    fn live_token_grants_full_write() {
        let gate = gate();
        let now = Utc::now();
        let token = admin_token(&gate, now);
        for op in [Operation::Read, Operation::ToggleFavorite, Operation::Write] {
            assert_eq!(gate.authorize_at(Some(&token), op, now), Authority::FullWrite);
        }
    }

    #[test]
    fn expired_token_loses_write_authority() {
        let gate = gate();
        let now = Utc::now();
        let token = admin_token(&gate, now);
        let later = now + Duration::hours(2);
        assert_eq!(
            gate.authorize_at(Some(&token), Operation::Write, later),
            Authority::Denied
        );
    }

    #[test]
    fn authority_requirements() {
        assert!(Authority::FullWrite.require_full_write().is_ok());
        assert!(matches!(
            Authority::FavoriteOnly.require_full_write(),
            Err(AppError::Unauthorized(_))
        ));
        assert!(Authority::FavoriteOnly.require_any_write().is_ok());
        assert!(Authority::Denied.require_any_write().is_err());
    }
}
