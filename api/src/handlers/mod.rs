//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod feed;
pub mod preferences;

pub use feed::{get_feed, get_recommended};
pub use preferences::{get_preferences, update_preferences};
