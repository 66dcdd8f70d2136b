//! Feed service
//!
//! Assembles a user's feed: preferences and memberships decide what to ask
//! the post service for, then posts are filtered, scored and ordered.

use std::sync::Arc;

use chrono::Utc;

use crate::app::scoring::{filter_posts, sort_items, ScoringWeights};
use crate::domain::entities::{
    Feed, FeedItem, FeedQuery, Post, PostId, PostOrder, PostQuery, SortMethod, UserId,
    UserPreference,
};
use crate::domain::ports::{CommunityService, PostService, PreferenceRepository, UserService};
use crate::error::AppError;

/// Service for generating user feeds
pub struct FeedService<PR, PS, CS, US>
where
    PR: PreferenceRepository + ?Sized,
    PS: PostService + ?Sized,
    CS: CommunityService + ?Sized,
    US: UserService + ?Sized,
{
    preferences: Arc<PR>,
    posts: Arc<PS>,
    communities: Arc<CS>,
    users: Arc<US>,
    weights: ScoringWeights,
}

impl<PR, PS, CS, US> FeedService<PR, PS, CS, US>
where
    PR: PreferenceRepository + ?Sized,
    PS: PostService + ?Sized,
    CS: CommunityService + ?Sized,
    US: UserService + ?Sized,
{
    pub fn new(preferences: Arc<PR>, posts: Arc<PS>, communities: Arc<CS>, users: Arc<US>) -> Self {
        Self {
            preferences,
            posts,
            communities,
            users,
            weights: ScoringWeights::default(),
        }
    }

    #[cfg(test)]
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Personalized feed from the user's communities
    pub async fn get_feed(&self, user_id: UserId, query: &FeedQuery) -> Result<Feed, AppError> {
        let preference = self.preferences.find_by_user(user_id).await?;

        let sort = query
            .sort_by
            .or(preference.as_ref().map(|p| p.feed_sort_method))
            .unwrap_or_default();

        let joined = self.communities.joined_communities(user_id).await?;

        let community_ids = match query.community_id {
            Some(id) => vec![id],
            None => joined,
        };

        tracing::debug!(
            user_id = %user_id,
            sort = %sort,
            communities = community_ids.len(),
            page = query.page,
            limit = query.limit,
            "Building feed"
        );

        let page = self
            .posts
            .list_posts(&PostQuery {
                community_ids,
                order: PostOrder::Default,
                page: query.page,
                limit: query.limit,
            })
            .await?;

        let now = Utc::now();
        let posts = self.apply_filters(page.posts, preference.as_ref(), query);
        let mut items = into_feed_items(posts, |post| {
            self.weights.relevance(post.like_count, post.created_at, now)
        });
        sort_items(&mut items, sort);

        Ok(Feed::new(items, page.total, query.page, query.limit))
    }

    /// Popular posts ranked for the user, always by relevance
    pub async fn get_recommended(
        &self,
        user_id: UserId,
        query: &FeedQuery,
    ) -> Result<Feed, AppError> {
        let preference = self.preferences.find_by_user(user_id).await?;

        // The profile only adds boosts, so the feed is still served without it
        let profile = match self.users.get_profile(user_id).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to get user profile");
                None
            }
        };

        tracing::debug!(
            user_id = %user_id,
            has_profile = profile.is_some(),
            page = query.page,
            limit = query.limit,
            "Building recommended feed"
        );

        let page = self
            .posts
            .list_posts(&PostQuery {
                community_ids: Vec::new(),
                order: PostOrder::Popular,
                page: query.page,
                limit: query.limit,
            })
            .await?;

        let now = Utc::now();
        let posts = self.apply_filters(page.posts, preference.as_ref(), query);
        let mut items = into_feed_items(posts, |post| {
            self.weights
                .recommendation(post, profile.as_ref(), preference.as_ref(), now)
        });
        sort_items(&mut items, SortMethod::Relevance);

        Ok(Feed::new(items, page.total, query.page, query.limit))
    }

    fn apply_filters(
        &self,
        posts: Vec<Post>,
        preference: Option<&UserPreference>,
        query: &FeedQuery,
    ) -> Vec<Post> {
        let excluded = preference
            .map(|p| p.excluded_tags.as_slice())
            .unwrap_or_default();
        filter_posts(posts, excluded, &query.tags)
    }
}

/// Score posts into feed items, skipping posts whose id is malformed
fn into_feed_items<F>(posts: Vec<Post>, score: F) -> Vec<FeedItem>
where
    F: Fn(&Post) -> f64,
{
    posts
        .into_iter()
        .filter_map(|post| match PostId::parse(&post.id) {
            Some(post_id) => {
                let relevance = score(&post);
                Some(FeedItem::from_post(post_id, post, relevance))
            }
            None => {
                tracing::debug!(post_id = %post.id, "Skipping post with invalid id");
                None
            }
        })
        .collect()
}
