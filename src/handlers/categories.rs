// src/handlers/categories.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::category::{
        CategoryPatch, CreateCategoryRequest, NewCategory, UpdateCategoryRequest,
    },
    services::CategoryService,
    utils::{
        gate::{BearerToken, Gate, Operation},
        json::AppJson,
    },
};

/// Lists all categories ordered by `sortOrder`. Public.
pub async fn list_categories(
    State(categories): State<CategoryService>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(categories.list().await?))
}

pub async fn get_category(
    State(categories): State<CategoryService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(categories.get(&id).await?))
}

/// Creates a category.
/// Admin only.
pub async fn create_category(
    State(categories): State<CategoryService>,
    State(gate): State<Gate>,
    bearer: BearerToken,
    AppJson(payload): AppJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let authority = gate.authorize(bearer.as_deref(), Operation::Write);
    authority.require_full_write()?;

    let category = categories
        .create(authority, NewCategory::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Updates a category.
/// Admin only.
pub async fn update_category(
    State(categories): State<CategoryService>,
    State(gate): State<Gate>,
    bearer: BearerToken,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let authority = gate.authorize(bearer.as_deref(), Operation::Write);
    authority.require_full_write()?;

    let patch = CategoryPatch::try_from(payload)?;
    Ok(Json(categories.update(&id, patch, authority).await?))
}

/// Deletes a category. 409 while questions still reference it.
/// Admin only.
pub async fn delete_category(
    State(categories): State<CategoryService>,
    State(gate): State<Gate>,
    bearer: BearerToken,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let authority = gate.authorize(bearer.as_deref(), Operation::Write);
    categories.delete(&id, authority).await?;

    Ok(StatusCode::NO_CONTENT)
}
