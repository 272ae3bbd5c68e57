//! Domain entities - the core business objects.

mod post;

pub use post::{NewPost, Post, SLUG_MAX_CHARS, TITLE_MAX_CHARS, is_valid_slug};
