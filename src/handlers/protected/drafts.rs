use axum::extract::Path;
use axum::{Extension, Json};
use uuid::Uuid;

use super::posts::PostRequest;
use crate::database::models::Post;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::post_service;

/// POST /api/drafts - create an unpublished post; 202
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<PostRequest>,
) -> ApiResult<Post> {
    let draft = post_service::create(&user, payload.title, payload.content, false).await?;
    Ok(ApiResponse::accepted(draft))
}

/// GET /api/drafts/:id - owner-only draft fetch
pub async fn get(Extension(user): Extension<AuthUser>, Path(id): Path<Uuid>) -> ApiResult<Post> {
    Ok(ApiResponse::success(post_service::get_draft(&user, id).await?))
}

/// PUT /api/drafts/:id - update a draft, or hide a published post; 202
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostRequest>,
) -> ApiResult<()> {
    post_service::update_draft(&user, id, payload.title, payload.content).await?;
    Ok(ApiResponse::accepted(()))
}
