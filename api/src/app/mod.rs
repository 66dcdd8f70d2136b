//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and upstream systems.

pub mod feed_service;
pub mod preference_service;
pub mod scoring;

pub use feed_service::FeedService;
pub use preference_service::PreferenceService;
