// src/services/credentials.rs

use std::sync::{Arc, LazyLock};

use uuid::Uuid;

use crate::{
    error::AppError,
    models::admin::{Admin, AdminIdentity},
    store::AdminStore,
    utils::hash::{hash_password, verify_password},
};

/// Verified against when the username is unknown, so both failure paths
/// cost one Argon2 run.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("not-a-real-admin-password").ok());

/// Credential verifier: exact username lookup plus Argon2 hash comparison.
#[derive(Clone)]
pub struct CredentialVerifier {
    admins: Arc<dyn AdminStore>,
}

impl CredentialVerifier {
    pub fn new(admins: Arc<dyn AdminStore>) -> Self {
        Self { admins }
    }

    /// `Ok(None)` for an unknown user or a wrong password. Store failures
    /// propagate as errors.
    pub async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AdminIdentity>, AppError> {
        let Some(admin) = self.admins.find_by_username(username).await? else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                verify_password(password, dummy)?;
            }
            tracing::warn!(username, "login attempt for unknown admin");
            return Ok(None);
        };

        if !verify_password(password, &admin.password_hash)? {
            tracing::warn!(username, "login attempt with wrong password");
            return Ok(None);
        }

        Ok(Some(AdminIdentity::from(&admin)))
    }

    /// Creates the admin unless the username already exists. Returns whether
    /// a new account was written.
    pub async fn provision(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if self.admins.find_by_username(username).await?.is_some() {
            return Ok(false);
        }

        let admin = Admin {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: hash_password(password)?,
        };
        self.admins.insert(&admin).await?;

        tracing::info!(username, "admin account provisioned");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Stores;

    #[tokio::test]
    async fn verify_accepts_only_matching_credentials() {
        let verifier = CredentialVerifier::new(Stores::memory().admins);
        assert!(verifier.provision("admin", "s3cret").await.unwrap());
        assert!(!verifier.provision("admin", "other").await.unwrap());

        let identity = verifier.verify("admin", "s3cret").await.unwrap().unwrap();
        assert_eq!(identity.username, "admin");

        assert!(verifier.verify("admin", "other").await.unwrap().is_none());
        assert!(verifier.verify("Admin", "s3cret").await.unwrap().is_none());
        assert!(verifier.verify("nobody", "s3cret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_user_is_checked_against_a_real_hash() {
        let dummy = DUMMY_HASH.as_deref().unwrap();
        assert!(dummy.starts_with("$argon2"));
        assert!(!verify_password("s3cret", dummy).unwrap());

        let verifier = CredentialVerifier::new(Stores::memory().admins);
        assert!(verifier.verify("ghost", "s3cret").await.unwrap().is_none());
    }
}
