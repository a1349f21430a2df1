// src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{AdminStore, CategoryStore, QuestionStore};
use crate::{
    error::AppError,
    models::{
        admin::Admin,
        category::Category,
        question::{Question, QuestionPatch},
    },
};

#[derive(Default)]
struct Tables {
    questions: HashMap<String, Question>,
    categories: HashMap<String, Category>,
    admins: HashMap<String, Admin>,
}

/// Process-local backend. Each operation holds the lock for its whole
/// read-modify-write, which makes toggles atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

fn name_taken(tables: &Tables, name: &str, except_id: Option<&str>) -> bool {
    tables
        .categories
        .values()
        .any(|c| c.name == name && Some(c.id.as_str()) != except_id)
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn insert(&self, question: &Question) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if tables.questions.contains_key(&question.id) {
            return Err(AppError::Conflict(format!(
                "Question '{}' already exists",
                question.id
            )));
        }
        tables
            .questions
            .insert(question.id.clone(), question.clone());
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Question>, AppError> {
        Ok(self.tables.read().await.questions.get(id).cloned())
    }

    async fn all(&self) -> Result<Vec<Question>, AppError> {
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }

    async fn update(
        &self,
        id: &str,
        patch: &QuestionPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.questions.get_mut(id).map(|q| {
            patch.apply(q);
            q.updated_at = now;
            q.clone()
        }))
    }

    async fn toggle_favorite(
        &self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.questions.get_mut(id).map(|q| {
            q.is_favorite = !q.is_favorite;
            q.updated_at = now;
            q.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.tables.write().await.questions.remove(id).is_some())
    }

    async fn count_in_category(&self, category_id: &str) -> Result<usize, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .questions
            .values()
            .filter(|q| q.category_id == category_id)
            .count())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn insert(&self, category: &Category) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if name_taken(&tables, &category.name, None) {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                category.name
            )));
        }
        tables
            .categories
            .insert(category.id.clone(), category.clone());
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Category>, AppError> {
        Ok(self.tables.read().await.categories.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, AppError> {
        let mut categories: Vec<Category> =
            self.tables.read().await.categories.values().cloned().collect();
        categories.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    async fn save(&self, category: &Category) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if name_taken(&tables, &category.name, Some(&category.id)) {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                category.name
            )));
        }
        match tables.categories.get_mut(&category.id) {
            Some(slot) => {
                *slot = category.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.questions.values().any(|q| q.category_id == id) {
            return Err(AppError::Conflict(
                "Category still has questions and cannot be deleted".to_string(),
            ));
        }
        Ok(tables.categories.remove(id).is_some())
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .admins
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn insert(&self, admin: &Admin) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if tables.admins.values().any(|a| a.username == admin.username) {
            return Err(AppError::Conflict(format!(
                "Admin '{}' already exists",
                admin.username
            )));
        }
        tables.admins.insert(admin.id.clone(), admin.clone());
        Ok(())
    }
}
