use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::text;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub account_id: Uuid,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pending post state flowing into an insert or update.
///
/// `finalize()` is the save hook that runs before every write: it escapes the
/// content, assigns a slug when none exists yet, and stamps `published_at` on
/// first publish. Existing slugs are never regenerated so published URLs stay
/// stable across edits.
#[derive(Debug, Clone)]
pub struct PostSave {
    pub title: String,
    pub content: String,
    pub slug: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl PostSave {
    /// State for a brand-new post or draft.
    pub fn new(title: String, content: String, published: bool) -> Self {
        Self {
            title,
            content,
            slug: None,
            published,
            published_at: None,
        }
    }

    /// State for an update, carrying over the fields the hook must not reset.
    pub fn for_update(existing: &Post, title: String, content: String, published: bool) -> Self {
        Self {
            title,
            content,
            slug: Some(existing.slug.clone()),
            published,
            published_at: existing.published_at,
        }
    }

    /// Run the pre-save hook and return the normalized state.
    pub fn finalize(mut self) -> Self {
        self.content = text::escape_html(&self.content);

        if self.slug.is_none() {
            self.slug = Some(text::make_slug(&self.title));
        }
        if self.published && self.published_at.is_none() {
            self.published_at = Some(Utc::now());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_post(slug: &str, published: bool) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            title: "Old title".into(),
            content: "old".into(),
            slug: slug.into(),
            published,
            published_at: published.then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn finalize_assigns_slug_and_escapes_content() {
        let save = PostSave::new("Hello World".into(), "<b>hi</b>".into(), false).finalize();
        assert!(save.slug.unwrap().starts_with("hello-world-"));
        assert_eq!(save.content, "&lt;b&gt;hi&lt;/b&gt;");
        assert!(save.published_at.is_none());
    }

    #[test]
    fn finalize_stamps_published_at_on_first_publish() {
        let save = PostSave::new("t".into(), "c".into(), true).finalize();
        assert!(save.published_at.is_some());
    }

    #[test]
    fn finalize_keeps_existing_slug_and_publish_date() {
        let post = existing_post("hello-world-ab1cd", true);
        let original_published_at = post.published_at;

        let save =
            PostSave::for_update(&post, "New title".into(), "new".into(), true).finalize();
        assert_eq!(save.slug.as_deref(), Some("hello-world-ab1cd"));
        assert_eq!(save.published_at, original_published_at);
    }

    #[test]
    fn publishing_a_draft_stamps_published_at_once() {
        // First publish of a former draft gets a timestamp; the slug it was
        // given at creation survives.
        let draft = existing_post("my-draft-9kq3z", false);

        let save = PostSave::for_update(&draft, "t".into(), "c".into(), true).finalize();
        assert!(save.published);
        assert!(save.published_at.is_some());
        assert_eq!(save.slug.as_deref(), Some("my-draft-9kq3z"));
    }

    #[test]
    fn unpublishing_keeps_published_at() {
        // Hiding a post then re-publishing must not move it to the top of the feed
        let post = existing_post("slug-xyz12", true);
        let save = PostSave::for_update(&post, "t".into(), "c".into(), false).finalize();
        assert_eq!(save.published_at, post.published_at);
        assert!(!save.published);
    }
}
