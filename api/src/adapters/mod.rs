//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;
pub mod upstream;

pub use postgres::PostgresPreferenceRepository;
pub use upstream::{build_http_client, HttpCommunityService, HttpPostService, HttpUserService};
