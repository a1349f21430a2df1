// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{
        filter::{FilterSpec, ListQuestionsParams},
        question::{CreateQuestionRequest, NewQuestion, QuestionPatch, UpdateQuestionRequest},
    },
    services::QuestionService,
    utils::{
        gate::{BearerToken, Gate, Operation},
        json::AppJson,
    },
};

/// Lists questions, optionally filtered by category, difficulty, search text
/// and favorites. Public.
pub async fn list_questions(
    State(questions): State<QuestionService>,
    Query(params): Query<ListQuestionsParams>,
) -> Result<impl IntoResponse, AppError> {
    let spec = FilterSpec::try_from(params)?;
    Ok(Json(questions.list(&spec).await?))
}

/// Question counts per category over the unfiltered collection. Public.
pub async fn question_counts(
    State(questions): State<QuestionService>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(questions.category_counts().await?))
}

/// Retrieves a single question by ID. Public.
pub async fn get_question(
    State(questions): State<QuestionService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(questions.get(&id).await?))
}

/// Creates a new question.
/// Admin only.
pub async fn create_question(
    State(questions): State<QuestionService>,
    State(gate): State<Gate>,
    bearer: BearerToken,
    AppJson(payload): AppJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let authority = gate.authorize(bearer.as_deref(), Operation::Write);
    authority.require_full_write()?;

    let question = questions
        .create(authority, NewQuestion::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(question)))
}

/// Partially updates a question.
///
/// Anonymous callers may only send `isFavorite`; admins may change any field.
pub async fn update_question(
    State(questions): State<QuestionService>,
    State(gate): State<Gate>,
    bearer: BearerToken,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let authority = gate.authorize(bearer.as_deref(), Operation::ToggleFavorite);
    let patch = QuestionPatch::try_from(payload)?;

    Ok(Json(questions.update(&id, patch, authority).await?))
}

/// Flips the favorite flag and returns the authoritative record.
pub async fn toggle_favorite(
    State(questions): State<QuestionService>,
    State(gate): State<Gate>,
    bearer: BearerToken,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let authority = gate.authorize(bearer.as_deref(), Operation::ToggleFavorite);

    Ok(Json(questions.toggle_favorite(&id, authority).await?))
}

/// Deletes a question by ID.
/// Admin only.
pub async fn delete_question(
    State(questions): State<QuestionService>,
    State(gate): State<Gate>,
    bearer: BearerToken,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let authority = gate.authorize(bearer.as_deref(), Operation::Write);
    questions.delete(&id, authority).await?;

    Ok(StatusCode::NO_CONTENT)
}
