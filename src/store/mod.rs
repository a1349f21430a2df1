// src/store/mod.rs
//
// Persistence boundary. Services only see these traits, so the in-memory and
// Postgres backends are interchangeable.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    models::{
        admin::Admin,
        category::Category,
        question::{Question, QuestionPatch},
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn insert(&self, question: &Question) -> Result<(), AppError>;

    async fn find(&self, id: &str) -> Result<Option<Question>, AppError>;

    /// Every stored question, in no particular order.
    async fn all(&self) -> Result<Vec<Question>, AppError>;

    /// Writes only the fields present in `patch` and stamps `updated_at`, in
    /// one atomic step. `None` when `id` is absent.
    async fn update(
        &self,
        id: &str,
        patch: &QuestionPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, AppError>;

    /// Atomically flips `is_favorite` and stamps `updated_at`.
    async fn toggle_favorite(
        &self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, AppError>;

    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    async fn count_in_category(&self, category_id: &str) -> Result<usize, AppError>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Fails with `Conflict` when the name is taken.
    async fn insert(&self, category: &Category) -> Result<(), AppError>;

    async fn find(&self, id: &str) -> Result<Option<Category>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError>;

    /// Ordered by `sort_order`, then `name`.
    async fn list(&self) -> Result<Vec<Category>, AppError>;

    async fn save(&self, category: &Category) -> Result<bool, AppError>;

    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AppError>;

    async fn insert(&self, admin: &Admin) -> Result<(), AppError>;
}

/// The three stores a running service needs.
#[derive(Clone)]
pub struct Stores {
    pub questions: Arc<dyn QuestionStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub admins: Arc<dyn AdminStore>,
}

impl Stores {
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            questions: store.clone(),
            categories: store.clone(),
            admins: store,
        }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            questions: store.clone(),
            categories: store.clone(),
            admins: store,
        }
    }
}
