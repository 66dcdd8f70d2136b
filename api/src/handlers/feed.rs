//! Feed handlers
//!
//! Personalized and recommended feeds for the authenticated user.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};

use crate::domain::entities::{Feed, FeedParams, FeedQuery, UserId};
use crate::error::AppError;
use crate::AppState;

/// GET /api/feed
///
/// Posts from the user's communities, ordered by `sort_by` or the stored
/// preference. Query: `sort_by`, `tags`, `community_id`, `page`, `limit`.
pub async fn get_feed(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    params: Result<Query<FeedParams>, QueryRejection>,
) -> Result<Json<Feed>, AppError> {
    let Query(params) = params?;
    let query = FeedQuery::try_from(params)?;
    let feed = state.feed_service.get_feed(user_id, &query).await?;
    Ok(Json(feed))
}

/// GET /api/feed/recommended
///
/// Popular posts ranked by relevance to the user. `sort_by` is ignored.
pub async fn get_recommended(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    params: Result<Query<FeedParams>, QueryRejection>,
) -> Result<Json<Feed>, AppError> {
    let Query(params) = params?;
    let query = FeedQuery::try_from(FeedParams {
        sort_by: None,
        ..params
    })?;
    let feed = state.feed_service.get_recommended(user_id, &query).await?;
    Ok(Json(feed))
}
