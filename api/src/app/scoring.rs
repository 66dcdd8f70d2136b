//! Feed scoring
//!
//! Weighted-sum relevance and recommendation scores, tag filtering and
//! ordering of feed items. Everything here is pure; callers pass `now`.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::domain::entities::{FeedItem, Post, SortMethod, UserPreference, UserProfile};

/// Weights for the relevance and recommendation scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Share of the base score given to recency
    pub recency: f64,
    /// Share of the base score given to popularity
    pub popularity: f64,
    /// Likes that count as one unit of popularity
    pub likes_per_unit: f64,
    /// Boost per post tag found in the preferred tags
    pub preferred_tag_boost: f64,
    /// Boost when the post is in a preferred community (applied once)
    pub preferred_community_boost: f64,
    /// Boost per post tag found in the profile interests
    pub interest_boost: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            recency: 0.7,
            popularity: 0.3,
            likes_per_unit: 100.0,
            preferred_tag_boost: 0.2,
            preferred_community_boost: 0.3,
            interest_boost: 0.1,
        }
    }
}

impl ScoringWeights {
    /// Base score from popularity and recency.
    ///
    /// Recency decays as `1 / (1 + age_in_days)`. Posts dated in the future
    /// count as brand new.
    pub fn relevance(&self, like_count: i64, created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let age_secs = (now - created_at).num_seconds().max(0) as f64;
        let age_days = age_secs / 86_400.0;

        let recency = 1.0 / (1.0 + age_days);
        let popularity = like_count as f64 / self.likes_per_unit;

        self.recency * recency + self.popularity * popularity
    }

    /// Relevance plus boosts from stored preferences and the user's profile
    pub fn recommendation(
        &self,
        post: &Post,
        profile: Option<&UserProfile>,
        preference: Option<&UserPreference>,
        now: DateTime<Utc>,
    ) -> f64 {
        let mut score = self.relevance(post.like_count, post.created_at, now);

        if let Some(pref) = preference {
            let matching = post.tags.iter().filter(|t| pref.prefers_tag(t)).count();
            score += self.preferred_tag_boost * matching as f64;

            if pref.prefers_community(post.community_id) {
                score += self.preferred_community_boost;
            }
        }

        if let Some(profile) = profile {
            let matching = post
                .tags
                .iter()
                .filter(|t| profile.is_interested_in(t))
                .count();
            score += self.interest_boost * matching as f64;
        }

        score
    }
}

/// Drop posts carrying an excluded tag; when `wanted` is non-empty keep only
/// posts carrying at least one of those tags.
pub fn filter_posts(posts: Vec<Post>, excluded: &[String], wanted: &[String]) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|post| !excluded.iter().any(|tag| post.has_tag(tag)))
        .filter(|post| wanted.is_empty() || wanted.iter().any(|tag| post.has_tag(tag)))
        .collect()
}

/// Order items in place. Ties fall back to newest first.
pub fn sort_items(items: &mut [FeedItem], method: SortMethod) {
    items.sort_by(|a, b| {
        let primary = match method {
            SortMethod::Date => Ordering::Equal,
            SortMethod::Popular => b.like_count.cmp(&a.like_count),
            SortMethod::Relevance => b.relevance.total_cmp(&a.relevance),
        };
        primary.then_with(|| b.created_at.cmp(&a.created_at))
    });
}
