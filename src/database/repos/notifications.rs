use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Notification;

const NOTIFICATION_COLUMNS: &str =
    "id, account_id, source_account_id, post_id, kind, message, seen, created_at";

/// Repository for Notification operations
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        account_id: Uuid,
        source_account_id: Uuid,
        post_id: Uuid,
        kind: &str,
        message: &str,
    ) -> Result<Notification, sqlx::Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (account_id, source_account_id, post_id, kind, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(account_id)
        .bind(source_account_id)
        .bind(post_id)
        .bind(kind)
        .bind(message)
        .fetch_one(&self.pool)
        .await
    }

    /// Set-based fan-out: one notification per follower of the author.
    /// Returns the number of notifications created.
    pub async fn insert_for_followers(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        kind: &str,
        message: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (account_id, source_account_id, post_id, kind, message)
            SELECT f.follower_id, $1, $2, $3, $4
            FROM follows f
            WHERE f.followee_id = $1
            "#,
        )
        .bind(author_id)
        .bind(post_id)
        .bind(kind)
        .bind(message)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Recipient's notifications, newest first.
    pub async fn list_for_account(
        &self,
        account_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS} FROM notifications
            WHERE account_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_unseen(&self, account_id: Uuid) -> Result<Vec<Notification>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS} FROM notifications
            WHERE account_id = $1 AND NOT seen
            ORDER BY created_at DESC
            "#
        ))
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn mark_seen(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE notifications SET seen = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
