use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// What happened to trigger the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Someone commented on the recipient's post
    Comment,
    /// Someone liked the recipient's comment
    Like,
    /// An account the recipient follows published a post
    NewPost,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Comment => "comment",
            NotificationKind::Like => "like",
            NotificationKind::NewPost => "new_post",
        }
    }

    /// Human-readable message shown in the notification feed.
    pub fn message(&self, source_name: &str, post_title: &str) -> String {
        match self {
            NotificationKind::Comment => {
                format!("{} commented on your post \"{}\"", source_name, post_title)
            }
            NotificationKind::Like => {
                format!("{} liked your comment on \"{}\"", source_name, post_title)
            }
            NotificationKind::NewPost => {
                format!("{} published a new post \"{}\"", source_name, post_title)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub account_id: Uuid,
    pub source_account_id: Uuid,
    pub post_id: Uuid,
    pub kind: String,
    pub message: String,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_as_str() {
        assert_eq!(NotificationKind::Comment.as_str(), "comment");
        assert_eq!(NotificationKind::Like.as_str(), "like");
        assert_eq!(NotificationKind::NewPost.as_str(), "new_post");
    }

    #[test]
    fn messages_name_the_actor_and_post() {
        let msg = NotificationKind::Comment.message("Alice", "Borrow checker tips");
        assert!(msg.contains("Alice"));
        assert!(msg.contains("Borrow checker tips"));
    }
}
