use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use quill_types::api::{CommentResponse, CreateCommentRequest};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::services::CommentService;
use crate::state::AppState;

pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    ApiJson(req): ApiJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state
        .run(move |tx| {
            CommentService::new(tx).create_comment(&post_id, &req.content, &req.author_id)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = state
        .run(move |tx| CommentService::new(tx).list_comments_by_post(&post_id))
        .await?;

    Ok(Json(
        comments
            .into_iter()
            .map(CommentResponse::from)
            .collect::<Vec<_>>(),
    ))
}
