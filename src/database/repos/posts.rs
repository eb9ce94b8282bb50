use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::models::{Post, PostSave};

const POST_COLUMNS: &str =
    "id, account_id, title, content, slug, published, published_at, created_at, updated_at";

/// Post row joined with its author's name and comment count, used by the
/// public read endpoints.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub account_id: Uuid,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub published_at: Option<DateTime<Utc>>,
    pub author_name: String,
    pub comment_count: i64,
}

const POST_WITH_AUTHOR_SELECT: &str = r#"
    SELECT p.id, p.account_id, p.title, p.content, p.slug, p.published_at,
           a.name AS author_name,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
    FROM posts p
    JOIN accounts a ON a.id = p.account_id
"#;

/// Repository for Post operations
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a post from already-finalized save state.
    pub async fn insert(&self, account_id: Uuid, save: &PostSave) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (account_id, title, content, slug, published, published_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(account_id)
        .bind(&save.title)
        .bind(&save.content)
        .bind(&save.slug)
        .bind(save.published)
        .bind(save.published_at)
        .fetch_one(&self.pool)
        .await
    }

    /// Update a post from already-finalized save state.
    pub async fn update(&self, id: Uuid, save: &PostSave) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET title = $2, content = $3, slug = $4, published = $5,
                published_at = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&save.title)
        .bind(&save.content)
        .bind(&save.slug)
        .bind(save.published)
        .bind(save.published_at)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE slug = $1"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn published_exists(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1 AND published)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }

    /// Published post detail by id, with author and comment count.
    pub async fn detail_by_id(&self, id: Uuid) -> Result<Option<PostWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, PostWithAuthor>(&format!(
            "{POST_WITH_AUTHOR_SELECT} WHERE p.id = $1 AND p.published"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Published post detail by slug.
    pub async fn detail_by_slug(&self, slug: &str) -> Result<Option<PostWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, PostWithAuthor>(&format!(
            "{POST_WITH_AUTHOR_SELECT} WHERE p.slug = $1 AND p.published"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    /// Published previews, newest first.
    pub async fn list_published(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, PostWithAuthor>(&format!(
            r#"{POST_WITH_AUTHOR_SELECT}
            WHERE p.published
            ORDER BY p.published_at DESC
            LIMIT $1 OFFSET $2"#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Keyword search across title and content of published posts.
    pub async fn search_published(
        &self,
        keyword: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(keyword));
        sqlx::query_as::<_, PostWithAuthor>(&format!(
            r#"{POST_WITH_AUTHOR_SELECT}
            WHERE p.published AND (p.title ILIKE $1 OR p.content ILIKE $1)
            ORDER BY p.published_at DESC
            LIMIT $2 OFFSET $3"#
        ))
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Most-commented published posts.
    pub async fn popular_by_comments(&self, limit: i64) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, PostWithAuthor>(&format!(
            r#"{POST_WITH_AUTHOR_SELECT}
            WHERE p.published
            ORDER BY comment_count DESC, p.published_at DESC
            LIMIT $1"#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Published posts whose comments collected the most likes.
    pub async fn popular_by_likes(&self, limit: i64) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, PostWithAuthor>(&format!(
            r#"{POST_WITH_AUTHOR_SELECT}
            WHERE p.published
            ORDER BY (
                SELECT COUNT(*)
                FROM comment_likes cl
                JOIN comments c ON c.id = cl.comment_id
                WHERE c.post_id = p.id
            ) DESC, p.published_at DESC
            LIMIT $1"#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}

/// Escape LIKE/ILIKE metacharacters so a keyword matches literally.
/// Backslash goes first so it does not re-escape the wildcard escapes.
fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_wildcards_and_backslash() {
        assert_eq!(escape_like("100%_done"), "100\\%\\_done");
        assert_eq!(escape_like("path\\to"), "path\\\\to");
        // A trailing backslash must not swallow the closing wildcard
        assert_eq!(escape_like("oops\\"), "oops\\\\");
        assert_eq!(escape_like("plain words"), "plain words");
    }
}
