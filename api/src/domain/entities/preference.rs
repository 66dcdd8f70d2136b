//! Feed preference domain entity
//!
//! Per-user sort and filter settings applied when assembling a feed.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a user, as issued by the identity service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a community in the community service
pub type CommunityId = i64;

/// Unique identifier for a stored preference record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceId(pub Uuid);

impl PreferenceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PreferenceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PreferenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How feed items are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMethod {
    /// Newest first
    #[default]
    Date,
    /// Highest score first
    Relevance,
    /// Most liked first
    Popular,
}

impl std::fmt::Display for SortMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMethod::Date => write!(f, "date"),
            SortMethod::Relevance => write!(f, "relevance"),
            SortMethod::Popular => write!(f, "popular"),
        }
    }
}

impl std::str::FromStr for SortMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortMethod::Date),
            "relevance" => Ok(SortMethod::Relevance),
            "popular" => Ok(SortMethod::Popular),
            _ => Err(format!(
                "Unknown sort method: {} (expected date, relevance or popular)",
                s
            )),
        }
    }
}

/// A user's stored feed preferences
///
/// The `prefered_*` wire names are kept for existing clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPreference {
    /// `None` until the record has been saved once
    pub id: Option<PreferenceId>,
    pub user_id: UserId,
    pub feed_sort_method: SortMethod,
    #[serde(rename = "prefered_tags", skip_serializing_if = "Vec::is_empty")]
    pub preferred_tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_tags: Vec<String>,
    #[serde(rename = "prefered_communities", skip_serializing_if = "Vec::is_empty")]
    pub preferred_communities: Vec<CommunityId>,
    pub updated_at: DateTime<Utc>,
}

impl UserPreference {
    /// Preferences used when the user never saved any
    pub fn default_for(user_id: UserId) -> Self {
        Self {
            id: None,
            user_id,
            feed_sort_method: SortMethod::Date,
            preferred_tags: Vec::new(),
            excluded_tags: Vec::new(),
            preferred_communities: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Apply a partial update. Present lists replace the stored ones.
    ///
    /// Nothing is changed when any field is invalid.
    pub fn apply(&mut self, update: &UpdatePreferences) -> Result<(), DomainError> {
        // An empty string means "leave unchanged"
        let sort = match update.feed_sort_method.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(method) => Some(
                method
                    .parse::<SortMethod>()
                    .map_err(DomainError::Validation)?,
            ),
        };
        check_len("prefered_tags", update.preferred_tags.as_deref(), MAX_TAGS)?;
        check_len("excluded_tags", update.excluded_tags.as_deref(), MAX_TAGS)?;
        check_len(
            "prefered_communities",
            update.preferred_communities.as_deref(),
            MAX_COMMUNITIES,
        )?;

        if let Some(sort) = sort {
            self.feed_sort_method = sort;
        }
        if let Some(tags) = &update.preferred_tags {
            self.preferred_tags = normalize_tags(tags);
        }
        if let Some(tags) = &update.excluded_tags {
            self.excluded_tags = normalize_tags(tags);
        }
        if let Some(communities) = &update.preferred_communities {
            let mut communities = communities.clone();
            communities.sort_unstable();
            communities.dedup();
            self.preferred_communities = communities;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn prefers_tag(&self, tag: &str) -> bool {
        self.preferred_tags.iter().any(|t| tags_match(t, tag))
    }

    pub fn prefers_community(&self, community_id: CommunityId) -> bool {
        self.preferred_communities.contains(&community_id)
    }
}

/// Request body for updating preferences. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePreferences {
    #[serde(default)]
    pub feed_sort_method: Option<String>,
    #[serde(default, rename = "prefered_tags", alias = "preferred_tags")]
    pub preferred_tags: Option<Vec<String>>,
    #[serde(default)]
    pub excluded_tags: Option<Vec<String>>,
    #[serde(
        default,
        rename = "prefered_communities",
        alias = "preferred_communities"
    )]
    pub preferred_communities: Option<Vec<CommunityId>>,
}

/// Most tags accepted in one preference list
pub const MAX_TAGS: usize = 100;

/// Most communities accepted in one preference list
pub const MAX_COMMUNITIES: usize = 500;

fn check_len<T>(field: &str, list: Option<&[T]>, max: usize) -> Result<(), DomainError> {
    match list {
        Some(list) if list.len() > max => Err(DomainError::Validation(format!(
            "{} accepts at most {} entries, got {}",
            field,
            max,
            list.len()
        ))),
        _ => Ok(()),
    }
}

/// Case-insensitive tag comparison, Unicode aware
pub fn tags_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Trim, drop blanks and duplicates while keeping first-seen order
fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(tags.len());
    let mut out = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && seen.insert(tag.to_lowercase()) {
            out.push(tag.to_string());
        }
    }
    out
}
