use axum::{
    Router,
    routing::{get, post},
};

use crate::error::ApiError;
use crate::state::AppState;
use crate::{auth, comments, health, posts, users};

/// All routes, without transport layers (CORS, tracing). The binary adds those.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/users/{user_id}", get(users::get_user))
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route("/api/posts/search", get(posts::search_posts))
        .route("/api/posts/{post_id}", get(posts::get_post))
        .route(
            "/api/posts/{post_id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".into())
}
