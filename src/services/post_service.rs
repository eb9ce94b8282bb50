use uuid::Uuid;

use crate::api::Pageable;
use crate::database::models::{Post, PostSave};
use crate::database::repos::{PostRepository, PostWithAuthor};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::notification_service;

/// Published post detail by id.
pub async fn get_detail_by_id(id: Uuid) -> Result<PostWithAuthor, ApiError> {
    let repo = PostRepository::new(DatabaseManager::pool().await?);
    repo.detail_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Post with id {} not found", id)))
}

/// Published post detail by slug.
pub async fn get_detail_by_slug(slug: &str) -> Result<PostWithAuthor, ApiError> {
    let repo = PostRepository::new(DatabaseManager::pool().await?);
    repo.detail_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Post with slug {} not found", slug)))
}

/// Published previews, newest first.
pub async fn list_previews(pageable: &Pageable) -> Result<Vec<PostWithAuthor>, ApiError> {
    let repo = PostRepository::new(DatabaseManager::pool().await?);
    Ok(repo.list_published(pageable.limit(), pageable.offset()).await?)
}

/// Keyword search over published posts.
pub async fn search(keyword: &str, pageable: &Pageable) -> Result<Vec<PostWithAuthor>, ApiError> {
    let repo = PostRepository::new(DatabaseManager::pool().await?);
    Ok(repo
        .search_published(keyword, pageable.limit(), pageable.offset())
        .await?)
}

/// Top-N popular posts ordered by the given property.
pub async fn popular(prop: &str, limit: i64) -> Result<Vec<PostWithAuthor>, ApiError> {
    let repo = PostRepository::new(DatabaseManager::pool().await?);
    match prop {
        "comment" => Ok(repo.popular_by_comments(limit).await?),
        "like" => Ok(repo.popular_by_likes(limit).await?),
        other => Err(ApiError::bad_request(format!(
            "Unknown popularity property: {}",
            other
        ))),
    }
}

/// Raw editable content of a post or draft, owner only.
pub async fn get_editable(slug: &str, requester: &AuthUser) -> Result<Post, ApiError> {
    let repo = PostRepository::new(DatabaseManager::pool().await?);
    let post = repo
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Post with slug {} not found", slug)))?;

    if post.account_id != requester.account_id {
        return Err(ApiError::forbidden("Not the author of this post"));
    }
    Ok(post)
}

/// Create a post or draft. The save hook runs before the insert; a published
/// post fans out to the author's followers.
pub async fn create(
    requester: &AuthUser,
    title: String,
    content: String,
    publish: bool,
) -> Result<Post, ApiError> {
    let repo = PostRepository::new(DatabaseManager::pool().await?);
    let save = PostSave::new(title, content, publish).finalize();
    let post = repo.insert(requester.account_id, &save).await?;

    tracing::info!(
        post_id = %post.id, slug = %post.slug, published = post.published,
        "post created"
    );
    if post.published {
        fan_out_to_followers(requester.account_id, post.id).await;
    }
    Ok(post)
}

/// Owner-only update that publishes the post (the draft endpoint is the
/// symmetric unpublish). Returns its (stable) slug. The very first publish of
/// a former draft stamps `published_at` and fans out to followers; a
/// re-publish does neither.
pub async fn update(
    requester: &AuthUser,
    id: Uuid,
    title: String,
    content: String,
) -> Result<String, ApiError> {
    let repo = PostRepository::new(DatabaseManager::pool().await?);
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Post with id {} not found", id)))?;

    if existing.account_id != requester.account_id {
        return Err(ApiError::forbidden("Not the author of this post"));
    }

    let first_publish = existing.published_at.is_none();
    let save = PostSave::for_update(&existing, title, content, true).finalize();
    let updated = repo.update(id, &save).await?;

    if first_publish {
        fan_out_to_followers(requester.account_id, updated.id).await;
    }
    Ok(updated.slug)
}

/// Best-effort follower fan-out: the post write already succeeded, so a
/// failed notification insert is logged instead of failing the request.
async fn fan_out_to_followers(author_id: Uuid, post_id: Uuid) {
    if let Err(e) = notification_service::notify_followers(author_id, post_id).await {
        tracing::warn!(post_id = %post_id, error = %e, "follower fan-out failed");
    }
}

/// Delete a post; allowed for the author or an admin.
pub async fn delete(requester: &AuthUser, id: Uuid) -> Result<(), ApiError> {
    let repo = PostRepository::new(DatabaseManager::pool().await?);
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Post with id {} not found", id)))?;

    if existing.account_id != requester.account_id && !requester.is_admin() {
        return Err(ApiError::forbidden("Not allowed to delete this post"));
    }

    repo.delete(id).await?;
    tracing::info!(post_id = %id, by = %requester.account_id, "post deleted");
    Ok(())
}

/// Owner-only draft fetch. Published posts are not served here.
pub async fn get_draft(requester: &AuthUser, id: Uuid) -> Result<Post, ApiError> {
    let repo = PostRepository::new(DatabaseManager::pool().await?);
    let post = repo
        .find_by_id(id)
        .await?
        .filter(|p| !p.published)
        .ok_or_else(|| ApiError::not_found(format!("Draft with id {} not found", id)))?;

    if post.account_id != requester.account_id {
        return Err(ApiError::forbidden("Not the author of this draft"));
    }
    Ok(post)
}

/// Owner-only draft update. Also turns a published post back into a draft
/// (hides it away); `published_at` is preserved either way.
pub async fn update_draft(
    requester: &AuthUser,
    id: Uuid,
    title: String,
    content: String,
) -> Result<(), ApiError> {
    let repo = PostRepository::new(DatabaseManager::pool().await?);
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Post with id {} not found", id)))?;

    if existing.account_id != requester.account_id {
        return Err(ApiError::forbidden("Not the author of this post"));
    }

    let save = PostSave::for_update(&existing, title, content, false).finalize();
    repo.update(id, &save).await?;
    Ok(())
}
