pub mod account_service;
pub mod comment_service;
pub mod notification_service;
pub mod post_service;
