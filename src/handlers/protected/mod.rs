// Protected handlers: everything under /api. The JWT middleware has already
// validated the token and injected an `AuthUser` extension by the time these
// run.

pub mod accounts;
pub mod comments;
pub mod drafts;
pub mod notifications;
pub mod posts;
