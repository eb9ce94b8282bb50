use axum::extract::Path;
use axum::Extension;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::account_service;

/// PUT /api/accounts/:id/follow - toggle following an account; answers with
/// the followee's follower count
pub async fn follow(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    let follower_count = account_service::toggle_follow(&user, id).await?;
    Ok(ApiResponse::success(json!({ "follower_count": follower_count })))
}
