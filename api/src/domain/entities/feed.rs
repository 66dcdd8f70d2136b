//! Feed entities
//!
//! The assembled feed returned to clients and the query that shapes it.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::post::{Post, PostId};
use super::preference::{CommunityId, SortMethod};
use crate::error::DomainError;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A post placed in a user's feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    pub id: Uuid,
    pub post_id: PostId,
    pub user_id: i64,
    pub community_id: CommunityId,
    pub title: String,
    pub content: String,
    pub like_count: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media_urls: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub relevance: f64,
    pub author_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author_avatar: String,
}

impl FeedItem {
    pub fn from_post(post_id: PostId, post: Post, relevance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            user_id: post.user_id,
            community_id: post.community_id,
            title: post.title,
            content: post.content,
            like_count: post.like_count,
            media_urls: post.media_urls,
            tags: post.tags,
            created_at: post.created_at,
            relevance,
            author_name: post.user_name,
            author_avatar: post.user_pic,
        }
    }
}

/// One page of a user's feed
#[derive(Debug, Clone, Serialize)]
pub struct Feed {
    pub items: Vec<FeedItem>,
    /// Total matching posts as reported by the post service
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

impl Feed {
    pub fn new(items: Vec<FeedItem>, total: i64, page: u32, limit: u32) -> Self {
        let seen = i64::from(page) * i64::from(limit);
        Self {
            items,
            total,
            page,
            limit,
            has_more: seen < total,
        }
    }
}

/// Helper to deserialize an empty (or blank) query value as `None`
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Raw query string parameters for feed endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedParams {
    pub sort_by: Option<String>,
    /// Comma separated tag list
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub community_id: Option<CommunityId>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,
}

/// Validated feed query with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    /// `None` defers to the stored preference
    pub sort_by: Option<SortMethod>,
    pub tags: Vec<String>,
    pub community_id: Option<CommunityId>,
    pub page: u32,
    pub limit: u32,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            sort_by: None,
            tags: Vec::new(),
            community_id: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TryFrom<FeedParams> for FeedQuery {
    type Error = DomainError;

    fn try_from(params: FeedParams) -> Result<Self, Self::Error> {
        let sort_by = match params.sort_by.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse().map_err(DomainError::Validation)?),
        };

        let tags = params
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let page = match params.page {
            Some(p) if p > 0 => u32::try_from(p).unwrap_or(u32::MAX),
            _ => 1,
        };
        let limit = match params.limit {
            Some(l) if l > 0 => l.min(i64::from(MAX_PAGE_SIZE)) as u32,
            _ => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            sort_by,
            tags,
            community_id: params.community_id.filter(|id| *id > 0),
            page,
            limit,
        })
    }
}
