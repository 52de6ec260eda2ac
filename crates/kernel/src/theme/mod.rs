//! Theme engine and template rendering.
//!
//! Provides Tera-based template rendering and the page links used by
//! paged theme routes.

mod engine;
pub mod pagination;

pub use engine::ThemeEngine;
pub use pagination::UrlContextListResult;
