// Posts API routes

use axum::{
    extract::{FromRef, State},
    routing::get,
    Json, Router,
};
use quill_core::Post;
use serde::Serialize;
use utoipa::ToSchema;

use super::common::{ApiError, ErrorResponse};
use crate::auth::{AuthState, AuthUser};
use crate::services::PostService;

/// App state for post routes
#[derive(Clone)]
pub struct AppState {
    pub service: PostService,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(service: PostService, auth: AuthState) -> Self {
        Self { service, auth }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Response for the post list
#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    pub postagens: Vec<Post>,
}

/// Create post routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_posts))
        .route("/postagens", get(list_posts))
        .with_state(state)
}

/// GET /postagens - List all posts
#[utoipa::path(
    get,
    path = "/postagens",
    responses(
        (status = 200, description = "List of posts", body = PostListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "postagens"
)]
pub async fn list_posts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<PostListResponse>, ApiError> {
    let postagens = state.service.list().await?;
    tracing::debug!(author_id = %auth.id, count = postagens.len(), "Listed posts");
    Ok(Json(PostListResponse { postagens }))
}
