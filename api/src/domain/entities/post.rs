//! Post entities
//!
//! Posts as served by the upstream post service, plus the user profile
//! fragment used for recommendations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::preference::{tags_match, CommunityId, UserId};

/// Helper to deserialize null as default (empty vec, empty string)
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifier of a post: a 24 character hex object id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Parse a raw id. Returns `None` unless it is 24 hex digits.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == 24 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(Self(raw.to_ascii_lowercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A post as returned by the post service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_id: i64,
    pub community_id: CommunityId,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub media_urls: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub user_name: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub user_pic: String,
}

impl Post {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| tags_match(t, tag))
    }
}

/// One page of posts from the post service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPage {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub total: i64,
}

/// Ordering requested from the post service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {
    /// Whatever the post service returns by default
    Default,
    Popular,
}

/// Parameters for listing posts upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// Restrict to these communities; empty means no restriction
    pub community_ids: Vec<CommunityId>,
    pub order: PostOrder,
    pub page: u32,
    pub limit: u32,
}

impl PostQuery {
    /// Query string pairs, in the order the post service expects them
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if self.order == PostOrder::Popular {
            params.push(("sort", "popular".to_string()));
        }
        if !self.community_ids.is_empty() {
            let joined = self
                .community_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("community_id", joined));
        }
        params.push(("page", self.page.to_string()));
        params.push(("limit", self.limit.to_string()));
        params
    }
}

/// The parts of a user profile that feed recommendations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub interests: Vec<String>,
}

impl UserProfile {
    pub fn is_interested_in(&self, tag: &str) -> bool {
        self.interests.iter().any(|i| tags_match(i, tag))
    }
}
