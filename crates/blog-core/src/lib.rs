//! # Blog Core
//!
//! The domain layer of the blog.
//! Posts, the keyword search filter, page-number pagination and the
//! read services built on top of them. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod search;
pub mod services;

pub use error::DomainError;
pub use pagination::{PAGE_SIZE, Page, PageRequest, PageWindow};
pub use search::SearchQuery;
pub use services::PostService;
