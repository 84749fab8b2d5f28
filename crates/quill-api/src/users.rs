use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use quill_types::api::UserResponse;

use crate::error::ApiError;
use crate::services::UserService;
use crate::state::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .run(move |tx| UserService::new(tx).get_user(&user_id))
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse::from(user)))
}
