// src/services/questions.rs

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        category::{CategoryCount, CategoryCounts, normalize_name},
        filter::FilterSpec,
        question::{NewQuestion, Question, QuestionPatch},
    },
    services::filter,
    store::{CategoryStore, QuestionStore},
    utils::gate::Authority,
};

/// Timestamps are kept at microsecond precision, the resolution Postgres
/// stores.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Question repository: CRUD with authority checks, category resolution and
/// newest-first listing.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionStore>,
    categories: Arc<dyn CategoryStore>,
}

impl QuestionService {
    pub fn new(questions: Arc<dyn QuestionStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self {
            questions,
            categories,
        }
    }

    async fn ensure_category(&self, category_id: &str) -> Result<(), AppError> {
        self.categories
            .find(category_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", category_id)))
    }

    pub async fn create(&self, authority: Authority, new: NewQuestion) -> Result<Question, AppError> {
        authority.require_full_write()?;
        self.ensure_category(&new.category_id).await?;

        let now = now();
        let question = Question {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            content: new.content,
            answer: new.answer,
            category_id: new.category_id,
            difficulty: new.difficulty,
            tags: new.tags,
            is_favorite: new.is_favorite,
            created_at: now,
            updated_at: now,
        };

        self.questions.insert(&question).await?;
        tracing::info!(id = %question.id, category = %question.category_id, "question created");

        Ok(question)
    }

    pub async fn get(&self, id: &str) -> Result<Question, AppError> {
        self.questions
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))
    }

    /// Filtered view, newest first. A category given by name is normalized
    /// and resolved to its id first.
    pub async fn list(&self, spec: &FilterSpec) -> Result<Vec<Question>, AppError> {
        let mut spec = spec.clone();
        if let Some(key) = spec.category.take() {
            let by_name = match normalize_name(&key) {
                Ok(name) => self.categories.find_by_name(&name).await?,
                Err(_) => None,
            };
            let resolved = by_name.map(|category| category.id).unwrap_or(key);
            spec.category = Some(resolved);
        }

        let mut matching = filter::filter(&self.questions.all().await?, &spec);
        filter::sort_newest_first(&mut matching);

        tracing::debug!(?spec, count = matching.len(), "questions listed");
        Ok(matching)
    }

    /// Per-category counts over the whole, unfiltered collection.
    pub async fn category_counts(&self) -> Result<CategoryCounts, AppError> {
        let questions = self.questions.all().await?;
        let categories = self
            .categories
            .list()
            .await?
            .into_iter()
            .map(|c| CategoryCount {
                count: filter::count_by_category(&questions, &c.id),
                category_id: c.id,
                name: c.name,
                label: c.label,
            })
            .collect();

        Ok(CategoryCounts {
            total: filter::count_by_category(&questions, crate::models::filter::ALL),
            categories,
        })
    }

    /// Partial update.
    ///
    /// `FavoriteOnly` authority may only touch `is_favorite`; anything else is
    /// `Forbidden`. `updated_at` is always refreshed.
    pub async fn update(
        &self,
        id: &str,
        patch: QuestionPatch,
        authority: Authority,
    ) -> Result<Question, AppError> {
        match authority {
            Authority::Denied => {
                return Err(AppError::Unauthorized("Admin session required".to_string()));
            }
            Authority::FavoriteOnly if patch.touches_content() => {
                return Err(AppError::Forbidden(
                    "Only the favorite flag can be changed without an admin session".to_string(),
                ));
            }
            Authority::FavoriteOnly | Authority::FullWrite => {}
        }

        if let Some(category_id) = &patch.category_id {
            self.ensure_category(category_id).await?;
        }

        let question = self
            .questions
            .update(id, &patch, now())
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

        tracing::info!(id = %question.id, ?authority, "question updated");
        Ok(question)
    }

    /// Flips `is_favorite` atomically and returns the authoritative record.
    pub async fn toggle_favorite(&self, id: &str, authority: Authority) -> Result<Question, AppError> {
        authority.require_any_write()?;

        let question = self
            .questions
            .toggle_favorite(id, now())
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

        tracing::info!(id = %question.id, is_favorite = question.is_favorite, "favorite toggled");
        Ok(question)
    }

    pub async fn delete(&self, id: &str, authority: Authority) -> Result<(), AppError> {
        authority.require_full_write()?;

        if !self.questions.delete(id).await? {
            return Err(AppError::NotFound("Question not found".to_string()));
        }

        tracing::info!(id, "question deleted");
        Ok(())
    }
}
