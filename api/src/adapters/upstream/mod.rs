//! Upstream service adapters
//!
//! reqwest clients for the post, community and user services.

pub mod client;
pub mod communities;
pub mod posts;
pub mod users;

pub use client::build_http_client;
pub use communities::HttpCommunityService;
pub use posts::HttpPostService;
pub use users::HttpUserService;
