use axum::extract::Path;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::dto::CommentView;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::comment_service;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// POST /api/posts/:id/comments - comment on a published post
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<CommentRequest>,
) -> ApiResult<CommentView> {
    Ok(ApiResponse::success(
        comment_service::add(&user, post_id, &payload.content).await?,
    ))
}

/// PUT /api/comments/:id - commenter-only edit
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CommentRequest>,
) -> ApiResult<CommentView> {
    Ok(ApiResponse::success(
        comment_service::modify(&user, id, &payload.content).await?,
    ))
}

/// DELETE /api/comments/:id - commenter-only; answers with the parent post's
/// remaining comment count
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    let remaining = comment_service::delete(&user, id).await?;
    Ok(ApiResponse::success(json!({ "comment_count": remaining })))
}

/// PUT /api/comments/:id/like - toggle a like; answers with the like count
pub async fn like(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    let like_count = comment_service::toggle_like(&user, id).await?;
    Ok(ApiResponse::success(json!({ "like_count": like_count })))
}
