pub mod manager;
pub mod models;
pub mod repos;

pub use manager::{DatabaseError, DatabaseManager};
