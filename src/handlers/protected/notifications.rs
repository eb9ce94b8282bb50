use axum::extract::{Path, Query};
use axum::Extension;
use uuid::Uuid;

use crate::api::Pageable;
use crate::database::models::Notification;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::notification_service;

/// GET /api/notifications - recipient's notifications, paged, newest first
pub async fn list(
    Extension(user): Extension<AuthUser>,
    Query(pageable): Query<Pageable>,
) -> ApiResult<Vec<Notification>> {
    Ok(ApiResponse::success(
        notification_service::list(&user, &pageable).await?,
    ))
}

/// GET /api/notifications/unseen - unseen notifications only
pub async fn unseen(Extension(user): Extension<AuthUser>) -> ApiResult<Vec<Notification>> {
    Ok(ApiResponse::success(
        notification_service::list_unseen(&user).await?,
    ))
}

/// PUT /api/notifications/:id/seen - recipient-only mark-as-seen
pub async fn mark_seen(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    notification_service::mark_seen(&user, id).await?;
    Ok(ApiResponse::success(()))
}
