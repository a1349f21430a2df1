// src/services/categories.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::AppError,
    models::category::{Category, CategoryPatch, NewCategory},
    store::{CategoryStore, QuestionStore},
    utils::gate::Authority,
};

/// Category repository: unique normalized names, sort order, and the
/// delete-time "in use" guard.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
    questions: Arc<dyn QuestionStore>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryStore>, questions: Arc<dyn QuestionStore>) -> Self {
        Self {
            categories,
            questions,
        }
    }

    /// `new.name` is expected to be normalized already.
    pub async fn create(&self, authority: Authority, new: NewCategory) -> Result<Category, AppError> {
        authority.require_full_write()?;

        if self.categories.find_by_name(&new.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                new.name
            )));
        }

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            label: new.label,
            sort_order: new.sort_order,
        };
        self.categories.insert(&category).await?;

        tracing::info!(id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        self.categories.list().await
    }

    pub async fn get(&self, id: &str) -> Result<Category, AppError> {
        self.categories
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    pub async fn update(
        &self,
        id: &str,
        patch: CategoryPatch,
        authority: Authority,
    ) -> Result<Category, AppError> {
        authority.require_full_write()?;

        let mut category = self.get(id).await?;

        if let Some(name) = patch.name {
            if let Some(other) = self.categories.find_by_name(&name).await? {
                if other.id != category.id {
                    return Err(AppError::Conflict(format!(
                        "Category '{}' already exists",
                        name
                    )));
                }
            }
            category.name = name;
        }
        if let Some(label) = patch.label {
            category.label = label;
        }
        if let Some(sort_order) = patch.sort_order {
            category.sort_order = sort_order;
        }

        if !self.categories.save(&category).await? {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        tracing::info!(id = %category.id, "category updated");
        Ok(category)
    }

    /// Refuses with `Conflict` while any question references the category.
    pub async fn delete(&self, id: &str, authority: Authority) -> Result<(), AppError> {
        authority.require_full_write()?;

        let in_use = self.questions.count_in_category(id).await?;
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "Category is in use by {} question(s) and cannot be deleted",
                in_use
            )));
        }

        if !self.categories.delete(id).await? {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        tracing::info!(id, "category deleted");
        Ok(())
    }
}
