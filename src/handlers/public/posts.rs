use axum::extract::{Path, Query};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::dto::CommentView;
use crate::api::Pageable;
use crate::database::repos::PostWithAuthor;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{comment_service, post_service};

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub keyword: Option<String>,
    /// Popularity property: `comment` or `like`
    pub prop: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// GET /posts - published previews, newest first.
///
/// `?keyword=` switches to search, `?prop=` to a top-N popularity listing,
/// matching the original single-path surface.
pub async fn list(Query(query): Query<ListPostsQuery>) -> ApiResult<Vec<PostWithAuthor>> {
    let pageable = Pageable {
        page: query.page,
        size: query.size,
    };

    let posts = if let Some(keyword) = query.keyword.as_deref() {
        post_service::search(keyword, &pageable).await?
    } else if let Some(prop) = query.prop.as_deref() {
        post_service::popular(prop, pageable.limit()).await?
    } else {
        post_service::list_previews(&pageable).await?
    };

    Ok(ApiResponse::success(posts))
}

/// GET /posts/:id - published post detail by id
pub async fn get(Path(id): Path<Uuid>) -> ApiResult<PostWithAuthor> {
    Ok(ApiResponse::success(post_service::get_detail_by_id(id).await?))
}

/// GET /posts/slug/:slug - published post detail by slug
pub async fn get_by_slug(Path(slug): Path<String>) -> ApiResult<PostWithAuthor> {
    Ok(ApiResponse::success(
        post_service::get_detail_by_slug(&slug).await?,
    ))
}

/// GET /posts/:id/comments - paged comments of a published post
pub async fn comments(
    Path(id): Path<Uuid>,
    Query(pageable): Query<Pageable>,
) -> ApiResult<Vec<CommentView>> {
    Ok(ApiResponse::success(
        comment_service::list_for_post(id, &pageable, None).await?,
    ))
}
