use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use quill_types::api::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::services::UserService;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .run(move |tx| UserService::new(tx).create_user(&req.username, &req.password))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            username: user.username,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req.username.clone();
    let user = state
        .run(move |tx| UserService::new(tx).authenticate(&req.username, &req.password))
        .await?
        .ok_or_else(|| {
            warn!("Failed login for {}", username);
            ApiError::Authentication("Invalid credentials".into())
        })?;

    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
    }))
}
