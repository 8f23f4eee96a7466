//! Data models for Catalog Desk

pub mod book;
pub mod category;

// Re-export commonly used types
pub use book::{Book, BookQuery};
pub use category::Category;
