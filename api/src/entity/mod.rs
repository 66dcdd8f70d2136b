//! SeaORM entities
//!
//! Table models for the feed database. Converted to domain entities by the
//! Postgres adapters.

pub mod feed_preferences;
