//! Application services - use cases composed from domain logic and ports.

mod posts;

pub use posts::PostService;
