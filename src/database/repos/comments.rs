use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::models::Comment;

const COMMENT_COLUMNS: &str = "id, post_id, account_id, content, created_at, updated_at";

/// Comment row joined with commenter name and like count.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub post_id: Uuid,
    pub account_id: Uuid,
    pub content: String,
    pub author_name: String,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository for Comment and CommentLike operations
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        post_id: Uuid,
        account_id: Uuid,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(&format!(
            r#"
            INSERT INTO comments (post_id, account_id, content)
            VALUES ($1, $2, $3)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(post_id)
        .bind(account_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_content(
        &self,
        comment_id: Uuid,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(&format!(
            r#"
            UPDATE comments
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(comment_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, comment_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(&self, comment_id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Paginated comments for a post, newest first.
    pub async fn list_for_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.post_id, c.account_id, c.content,
                   a.name AS author_name,
                   (SELECT COUNT(*) FROM comment_likes cl WHERE cl.comment_id = c.id) AS like_count,
                   c.created_at, c.updated_at
            FROM comments c
            JOIN accounts a ON a.id = c.account_id
            WHERE c.post_id = $1
            ORDER BY c.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(post_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count_for_post(&self, post_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn like_count(&self, comment_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comment_likes WHERE comment_id = $1")
            .bind(comment_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Idempotent like; returns true when a new row was inserted.
    pub async fn insert_like(
        &self,
        comment_id: Uuid,
        account_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO comment_likes (comment_id, account_id)
            VALUES ($1, $2)
            ON CONFLICT (comment_id, account_id) DO NOTHING
            RETURNING comment_id
            "#,
        )
        .bind(comment_id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inserted.is_some())
    }

    /// Idempotent unlike; returns true when a row was removed.
    pub async fn delete_like(
        &self,
        comment_id: Uuid,
        account_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM comment_likes WHERE comment_id = $1 AND account_id = $2")
                .bind(comment_id)
                .bind(account_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Of the given comments, the ones `account_id` has liked.
    pub async fn liked_among(
        &self,
        account_id: Uuid,
        comment_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        if comment_ids.is_empty() {
            return Ok(vec![]);
        }
        sqlx::query_scalar::<_, Uuid>(
            "SELECT comment_id FROM comment_likes WHERE account_id = $1 AND comment_id = ANY($2)",
        )
        .bind(account_id)
        .bind(comment_ids)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn has_liked(&self, comment_id: Uuid, account_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM comment_likes WHERE comment_id = $1 AND account_id = $2)",
        )
        .bind(comment_id)
        .bind(account_id)
        .fetch_one(&self.pool)
        .await
    }
}
