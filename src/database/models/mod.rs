pub mod account;
pub mod comment;
pub mod notification;
pub mod post;

pub use account::Account;
pub use comment::Comment;
pub use notification::{Notification, NotificationKind};
pub use post::{Post, PostSave};
