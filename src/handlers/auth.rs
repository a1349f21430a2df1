// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::admin::LoginRequest,
    services::CredentialVerifier,
    utils::{
        gate::{BearerToken, Gate},
        json::AppJson,
    },
};

/// Authenticates an admin and returns a session token.
///
/// 400 when a field is empty, 401 when the pair does not verify.
pub async fn login(
    State(credentials): State<CredentialVerifier>,
    State(gate): State<Gate>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let admin = credentials
        .verify(&payload.username, &payload.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let (token, expires_at) = gate.codec().issue(&admin)?;

    tracing::info!(username = %admin.username, "admin logged in");

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "expiresAt": expires_at,
        "admin": admin,
    })))
}

/// Reports the identity behind a live session token.
pub async fn verify(
    State(gate): State<Gate>,
    bearer: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    let token = bearer
        .as_deref()
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    let session = gate
        .codec()
        .decode(token)
        .ok_or_else(|| AppError::Unauthorized("Token is invalid or expired".to_string()))?;

    Ok(Json(json!({
        "admin": session.admin,
        "expiresAt": session.expires_at,
    })))
}
