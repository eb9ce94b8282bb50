pub mod dto;
pub mod pagination;

pub use pagination::Pageable;
