use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::Account;
use crate::database::repos::CommentWithAuthor;

/// Public view of an account (no credential material).
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
            role: account.role.clone(),
        }
    }
}

/// Login payload: token plus the account it belongs to.
#[derive(Debug, Serialize)]
pub struct LoginView {
    pub token: String,
    pub account: AccountView,
    pub expires_in: u64,
}

/// Comment as rendered in a post's comment feed, with viewer-relative flags.
#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub author_name: String,
    pub like_count: i64,
    /// True when the requesting account wrote this comment
    pub mine: bool,
    /// True when the requesting account has liked this comment
    pub liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentView {
    pub fn from_row(row: CommentWithAuthor, viewer: Option<Uuid>, liked: bool) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            content: row.content,
            author_name: row.author_name,
            like_count: row.like_count,
            mine: viewer == Some(row.account_id),
            liked,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
