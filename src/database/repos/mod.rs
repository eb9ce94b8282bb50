pub mod accounts;
pub mod comments;
pub mod follows;
pub mod notifications;
pub mod posts;

pub use accounts::AccountRepository;
pub use comments::{CommentRepository, CommentWithAuthor};
pub use follows::FollowRepository;
pub use notifications::NotificationRepository;
pub use posts::{PostRepository, PostWithAuthor};
