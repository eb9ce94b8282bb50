use uuid::Uuid;

use crate::api::Pageable;
use crate::database::models::{Notification, NotificationKind};
use crate::database::repos::{AccountRepository, NotificationRepository, PostRepository};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Record a single notification for `recipient_id` about `post_id`.
///
/// Self-notifications are suppressed: acting on your own content creates
/// nothing.
pub async fn create_notification(
    source_id: Uuid,
    recipient_id: Uuid,
    post_id: Uuid,
    kind: NotificationKind,
) -> Result<(), ApiError> {
    if source_id == recipient_id {
        return Ok(());
    }

    let pool = DatabaseManager::pool().await?;
    let accounts = AccountRepository::new(pool.clone());
    let posts = PostRepository::new(pool.clone());

    let source = accounts
        .find_by_id(source_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Source account not found"))?;
    let post = posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let message = kind.message(&source.name, &post.title);
    NotificationRepository::new(pool)
        .insert(recipient_id, source_id, post_id, kind.as_str(), &message)
        .await?;

    tracing::debug!(
        recipient = %recipient_id, source = %source_id, kind = kind.as_str(),
        "notification created"
    );
    Ok(())
}

/// Fan out a `new_post` notification to every follower of the author.
pub async fn notify_followers(author_id: Uuid, post_id: Uuid) -> Result<(), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let accounts = AccountRepository::new(pool.clone());
    let posts = PostRepository::new(pool.clone());

    let author = accounts
        .find_by_id(author_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Author account not found"))?;
    let post = posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let kind = NotificationKind::NewPost;
    let message = kind.message(&author.name, &post.title);
    let created = NotificationRepository::new(pool)
        .insert_for_followers(author_id, post_id, kind.as_str(), &message)
        .await?;

    tracing::info!(author = %author_id, post = %post_id, created, "follower fan-out");
    Ok(())
}

/// Recipient's notifications, paged, newest first.
pub async fn list(requester: &AuthUser, pageable: &Pageable) -> Result<Vec<Notification>, ApiError> {
    let repo = NotificationRepository::new(DatabaseManager::pool().await?);
    Ok(repo
        .list_for_account(requester.account_id, pageable.limit(), pageable.offset())
        .await?)
}

/// Unseen notifications only.
pub async fn list_unseen(requester: &AuthUser) -> Result<Vec<Notification>, ApiError> {
    let repo = NotificationRepository::new(DatabaseManager::pool().await?);
    Ok(repo.list_unseen(requester.account_id).await?)
}

/// Recipient-only mark-as-seen.
pub async fn mark_seen(requester: &AuthUser, id: Uuid) -> Result<(), ApiError> {
    let repo = NotificationRepository::new(DatabaseManager::pool().await?);
    let notification = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Notification not found"))?;

    if notification.account_id != requester.account_id {
        return Err(ApiError::forbidden("Not the recipient of this notification"));
    }

    repo.mark_seen(id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn acting_on_own_content_creates_nothing() {
        // Runs without any database configured: the suppression short-circuits
        // before a pool is ever requested.
        let me = Uuid::new_v4();
        let result =
            create_notification(me, me, Uuid::new_v4(), NotificationKind::Like).await;
        assert!(result.is_ok());
    }
}
