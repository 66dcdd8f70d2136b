//! Preference handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::domain::entities::{UpdatePreferences, UserId, UserPreference};
use crate::error::AppError;
use crate::AppState;

/// GET /api/feed/preferences
///
/// Stored preferences, or the defaults if the user never saved any.
pub async fn get_preferences(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<UserPreference>, AppError> {
    let preference = state.preference_service.get(user_id).await?;
    Ok(Json(preference))
}

/// PUT /api/feed/preferences
///
/// Partial update; absent fields keep their stored value.
pub async fn update_preferences(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    body: Result<Json<UpdatePreferences>, JsonRejection>,
) -> Result<Json<UserPreference>, AppError> {
    let Json(body) = body?;
    let preference = state.preference_service.update(user_id, &body).await?;
    Ok(Json(preference))
}
