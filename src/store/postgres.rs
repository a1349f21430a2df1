// src/store/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{AdminStore, CategoryStore, QuestionStore};
use crate::{
    error::AppError,
    models::{
        admin::Admin,
        category::Category,
        question::{Question, QuestionPatch, Tags},
    },
};

const QUESTION_COLUMNS: &str = "id, title, content, answer, category_id, difficulty, tags, \
                                is_favorite, created_at, updated_at";

/// Row shape of the 'questions' table.
#[derive(Debug, FromRow)]
struct QuestionRow {
    id: String,
    title: String,
    content: String,
    answer: String,
    category_id: String,
    difficulty: String,
    tags: String,
    is_favorite: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = AppError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let difficulty = row.difficulty.parse().map_err(|_| {
            AppError::InternalServerError(format!(
                "Question {} has corrupt difficulty '{}'",
                row.id, row.difficulty
            ))
        })?;

        Ok(Question {
            tags: Tags::from_storage(&row.tags),
            difficulty,
            id: row.id,
            title: row.title,
            content: row.content,
            answer: row.answer,
            category_id: row.category_id,
            is_favorite: row.is_favorite,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    label: String,
    sort_order: i32,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            label: row.label,
            sort_order: row.sort_order,
        }
    }
}

#[derive(Debug, FromRow)]
struct AdminRow {
    id: String,
    username: String,
    password_hash: String,
}

/// Postgres backend. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps unique and foreign-key violations to `Conflict`, everything else to 500.
fn map_write_error(e: sqlx::Error, conflict: impl FnOnce() -> String) -> AppError {
    let is_conflict = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation() || db.is_foreign_key_violation());
    if is_conflict {
        return AppError::Conflict(conflict());
    }

    tracing::error!("Database write failed: {:?}", e);
    AppError::from(e)
}

#[async_trait]
impl QuestionStore for PgStore {
    async fn insert(&self, q: &Question) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO questions
            (id, title, content, answer, category_id, difficulty, tags, is_favorite, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&q.id)
        .bind(&q.title)
        .bind(&q.content)
        .bind(&q.answer)
        .bind(&q.category_id)
        .bind(q.difficulty.as_str())
        .bind(q.tags.to_storage())
        .bind(q.is_favorite)
        .bind(q.created_at)
        .bind(q.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || "Question references a missing category".to_string()))?;

        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Question>, AppError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Question::try_from)
            .transpose()
    }

    async fn all(&self) -> Result<Vec<Question>, AppError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions");
        sqlx::query_as::<_, QuestionRow>(&sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Question::try_from)
            .collect()
    }

    async fn update(
        &self,
        id: &str,
        patch: &QuestionPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, AppError> {
        // Absent fields keep their stored value.
        let sql = format!(
            r#"
            UPDATE questions SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                answer = COALESCE($4, answer),
                category_id = COALESCE($5, category_id),
                difficulty = COALESCE($6, difficulty),
                tags = COALESCE($7, tags),
                is_favorite = COALESCE($8, is_favorite),
                updated_at = $9
            WHERE id = $1
            RETURNING {QUESTION_COLUMNS}
            "#
        );
        sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(id)
            .bind(patch.title.as_deref())
            .bind(patch.content.as_deref())
            .bind(patch.answer.as_deref())
            .bind(patch.category_id.as_deref())
            .bind(patch.difficulty.map(|d| d.as_str()))
            .bind(patch.tags.as_ref().map(Tags::to_storage))
            .bind(patch.is_favorite)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, || "Question references a missing category".to_string()))?
            .map(Question::try_from)
            .transpose()
    }

    async fn toggle_favorite(
        &self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, AppError> {
        let sql = format!(
            "UPDATE questions SET is_favorite = NOT is_favorite, updated_at = $2 \
             WHERE id = $1 RETURNING {QUESTION_COLUMNS}"
        );
        sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?
            .map(Question::try_from)
            .transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_in_category(&self, category_id: &str) -> Result<usize, AppError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM questions WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(usize::try_from(count).unwrap_or(0))
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn insert(&self, c: &Category) -> Result<(), AppError> {
        sqlx::query("INSERT INTO categories (id, name, label, sort_order) VALUES ($1, $2, $3, $4)")
            .bind(&c.id)
            .bind(&c.name)
            .bind(&c.label)
            .bind(c.sort_order)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, || format!("Category '{}' already exists", c.name)))?;

        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Category>, AppError> {
        Ok(sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, label, sort_order FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Category::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        Ok(sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, label, sort_order FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .map(Category::from))
    }

    async fn list(&self) -> Result<Vec<Category>, AppError> {
        Ok(sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, label, sort_order FROM categories ORDER BY sort_order ASC, name ASC",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Category::from)
        .collect())
    }

    async fn save(&self, c: &Category) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE categories SET name = $2, label = $3, sort_order = $4 WHERE id = $1",
        )
        .bind(&c.id)
        .bind(&c.name)
        .bind(&c.label)
        .bind(c.sort_order)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || format!("Category '{}' already exists", c.name)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        // The FK is ON DELETE RESTRICT, so a question inserted after the
        // service-level check still blocks the delete.
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(e, || {
                    "Category still has questions and cannot be deleted".to_string()
                })
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AdminStore for PgStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AppError> {
        Ok(sqlx::query_as::<_, AdminRow>(
            "SELECT id, username, password_hash FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| Admin {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
        }))
    }

    async fn insert(&self, admin: &Admin) -> Result<(), AppError> {
        sqlx::query("INSERT INTO admins (id, username, password_hash) VALUES ($1, $2, $3)")
            .bind(&admin.id)
            .bind(&admin.username)
            .bind(&admin.password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(e, || format!("Admin '{}' already exists", admin.username))
            })?;

        Ok(())
    }
}
