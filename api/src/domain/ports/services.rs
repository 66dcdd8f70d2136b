//! Upstream service ports
//!
//! The feed owns no posts, memberships or profiles; it reads them from the
//! post, community and user services through these traits.

use async_trait::async_trait;

use crate::domain::entities::{CommunityId, PostPage, PostQuery, UserId, UserProfile};
use crate::error::UpstreamError;

/// Source of posts
#[async_trait]
pub trait PostService: Send + Sync {
    async fn list_posts(&self, query: &PostQuery) -> Result<PostPage, UpstreamError>;
}

/// Source of community memberships
#[async_trait]
pub trait CommunityService: Send + Sync {
    /// Ids of the communities the user has joined
    async fn joined_communities(&self, user_id: UserId)
        -> Result<Vec<CommunityId>, UpstreamError>;
}

/// Source of user profiles
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, UpstreamError>;
}
