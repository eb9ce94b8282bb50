use uuid::Uuid;

use crate::api::dto::CommentView;
use crate::api::Pageable;
use crate::database::models::NotificationKind;
use crate::database::repos::{CommentRepository, PostRepository};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::notification_service;

/// Add a comment to a published post and notify the post's author.
pub async fn add(
    requester: &AuthUser,
    post_id: Uuid,
    content: &str,
) -> Result<CommentView, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let posts = PostRepository::new(pool.clone());
    let comments = CommentRepository::new(pool);

    let post = posts
        .find_by_id(post_id)
        .await?
        .filter(|p| p.published)
        .ok_or_else(|| {
            ApiError::unprocessable_entity(format!("Post with id {} not found", post_id))
        })?;

    let comment = comments.insert(post_id, requester.account_id, content).await?;

    // The comment is already persisted at this point; a failed notification
    // must not turn the request into an error.
    if let Err(e) = notification_service::create_notification(
        requester.account_id,
        post.account_id,
        post_id,
        NotificationKind::Comment,
    )
    .await
    {
        tracing::warn!(comment_id = %comment.id, error = %e, "comment notification failed");
    }

    Ok(CommentView {
        id: comment.id,
        post_id: comment.post_id,
        content: comment.content,
        author_name: requester.name.clone(),
        like_count: 0,
        mine: true,
        liked: false,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    })
}

/// Commenter-only edit.
pub async fn modify(
    requester: &AuthUser,
    comment_id: Uuid,
    content: &str,
) -> Result<CommentView, ApiError> {
    let comments = CommentRepository::new(DatabaseManager::pool().await?);

    let existing = comments
        .find_by_id(comment_id)
        .await?
        .ok_or_else(|| ApiError::unprocessable_entity("Comment not found"))?;

    if existing.account_id != requester.account_id {
        return Err(ApiError::forbidden("Not the author of this comment"));
    }

    let updated = comments.update_content(comment_id, content).await?;
    let like_count = comments.like_count(comment_id).await?;
    let liked = comments.has_liked(comment_id, requester.account_id).await?;

    Ok(CommentView {
        id: updated.id,
        post_id: updated.post_id,
        content: updated.content,
        author_name: requester.name.clone(),
        like_count,
        mine: true,
        liked,
        created_at: updated.created_at,
        updated_at: updated.updated_at,
    })
}

/// Commenter-only delete. Returns the parent post's remaining comment count.
pub async fn delete(requester: &AuthUser, comment_id: Uuid) -> Result<i64, ApiError> {
    let comments = CommentRepository::new(DatabaseManager::pool().await?);

    let existing = comments
        .find_by_id(comment_id)
        .await?
        .ok_or_else(|| ApiError::unprocessable_entity("Comment not found"))?;

    if existing.account_id != requester.account_id {
        return Err(ApiError::forbidden("Not the author of this comment"));
    }

    comments.delete(comment_id).await?;
    Ok(comments.count_for_post(existing.post_id).await?)
}

/// Paged comments of a published post. Viewer-relative flags are filled in
/// when the request carries an authenticated account.
pub async fn list_for_post(
    post_id: Uuid,
    pageable: &Pageable,
    viewer: Option<Uuid>,
) -> Result<Vec<CommentView>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let posts = PostRepository::new(pool.clone());
    let comments = CommentRepository::new(pool);

    if !posts.published_exists(post_id).await? {
        return Err(ApiError::not_found(format!("Post with id {} not found", post_id)));
    }

    let rows = comments
        .list_for_post(post_id, pageable.limit(), pageable.offset())
        .await?;

    let liked_ids = match viewer {
        Some(account_id) => {
            let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
            comments.liked_among(account_id, &ids).await?
        }
        None => vec![],
    };

    Ok(rows
        .into_iter()
        .map(|row| {
            let liked = liked_ids.contains(&row.id);
            CommentView::from_row(row, viewer, liked)
        })
        .collect())
}

/// Toggle a like on a comment. Returns the resulting like count; liking
/// someone else's comment notifies its author.
pub async fn toggle_like(requester: &AuthUser, comment_id: Uuid) -> Result<i64, ApiError> {
    let comments = CommentRepository::new(DatabaseManager::pool().await?);

    let comment = comments
        .find_by_id(comment_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    if comments.has_liked(comment_id, requester.account_id).await? {
        comments.delete_like(comment_id, requester.account_id).await?;
    } else {
        comments.insert_like(comment_id, requester.account_id).await?;

        // Same stance as `add`: the like is persisted, notify best-effort.
        if let Err(e) = notification_service::create_notification(
            requester.account_id,
            comment.account_id,
            comment.post_id,
            NotificationKind::Like,
        )
        .await
        {
            tracing::warn!(comment_id = %comment_id, error = %e, "like notification failed");
        }
    }

    Ok(comments.like_count(comment_id).await?)
}
