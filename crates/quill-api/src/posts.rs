use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use quill_types::api::{CreatePostRequest, PostResponse, SearchQuery};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::services::PostService;
use crate::state::AppState;

/// Any caller may create or read any post; there is no session layer.
pub async fn create_post(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .run(move |tx| {
            PostService::new(tx).create_post(&req.title, &req.content, &req.author_id)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .run(move |tx| PostService::new(tx).get_post(&post_id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;

    Ok(Json(PostResponse::from(post)))
}

pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let posts = state
        .run(|tx| PostService::new(tx).list_posts())
        .await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect::<Vec<_>>()))
}

/// GET /api/posts/search?q=
pub async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let posts = state
        .run(move |tx| PostService::new(tx).search_posts(&query.q))
        .await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect::<Vec<_>>()))
}
