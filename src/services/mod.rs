// src/services/mod.rs

pub mod categories;
pub mod credentials;
pub mod favorites;
pub mod filter;
pub mod questions;

pub use categories::CategoryService;
pub use credentials::CredentialVerifier;
pub use questions::QuestionService;
