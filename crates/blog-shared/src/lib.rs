//! # Blog Shared
//!
//! Wire types for the JSON API.
//! Kept free of domain and server dependencies so clients can reuse them.

pub mod dto;
pub mod response;

pub use dto::{PostDetail, PostSummary};
pub use response::ErrorResponse;
