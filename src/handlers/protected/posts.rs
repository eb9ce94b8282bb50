use axum::extract::Path;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Post;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::post_service;

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

/// POST /api/posts - create a published post and fan out to followers
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<PostRequest>,
) -> ApiResult<Post> {
    let post = post_service::create(&user, payload.title, payload.content, true).await?;
    Ok(ApiResponse::success(post))
}

/// PUT /api/posts/:id - owner-only update that (re-)publishes the post;
/// answers 202 with the post's slug
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostRequest>,
) -> ApiResult<String> {
    let slug = post_service::update(&user, id, payload.title, payload.content).await?;
    Ok(ApiResponse::accepted(slug))
}

/// DELETE /api/posts/:id - owner or admin; 204
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    post_service::delete(&user, id).await?;
    Ok(ApiResponse::<()>::no_content())
}

/// GET /api/posts/edit/:slug - raw editable content, owner only
pub async fn editable(
    Extension(user): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> ApiResult<Post> {
    Ok(ApiResponse::success(
        post_service::get_editable(&slug, &user).await?,
    ))
}
