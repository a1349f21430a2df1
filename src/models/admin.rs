// src/models/admin.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents the 'admins' table. Accounts are provisioned out of band.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: String,

    /// Unique username.
    pub username: String,

    /// Argon2 password hash. Never serialized.
    pub password_hash: String,
}

/// Identity asserted by a successful credential check or a live session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: String,
    pub username: String,
}

impl From<&Admin> for AdminIdentity {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id.clone(),
            username: admin.username.clone(),
        }
    }
}

/// DTO for admin login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "Username must not be empty."))]
    pub username: String,
    #[validate(length(min = 1, max = 128, message = "Password must not be empty."))]
    pub password: String,
}
