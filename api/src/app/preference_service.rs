//! Preference service
//!
//! Read and partially update a user's feed preferences.

use std::sync::Arc;

use crate::domain::entities::{UpdatePreferences, UserId, UserPreference};
use crate::domain::ports::PreferenceRepository;
use crate::error::AppError;

/// Service for managing feed preferences
pub struct PreferenceService<PR>
where
    PR: PreferenceRepository + ?Sized,
{
    preferences: Arc<PR>,
}

impl<PR> PreferenceService<PR>
where
    PR: PreferenceRepository + ?Sized,
{
    pub fn new(preferences: Arc<PR>) -> Self {
        Self { preferences }
    }

    /// Stored preferences, or the defaults when none were saved
    pub async fn get(&self, user_id: UserId) -> Result<UserPreference, AppError> {
        let preference = self
            .preferences
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| UserPreference::default_for(user_id));
        Ok(preference)
    }

    /// Apply the present fields of `update` and persist the result
    pub async fn update(
        &self,
        user_id: UserId,
        update: &UpdatePreferences,
    ) -> Result<UserPreference, AppError> {
        let mut preference = self.get(user_id).await?;
        preference.apply(update)?;

        let saved = self.preferences.save(&preference).await?;

        tracing::info!(
            user_id = %user_id,
            sort = %saved.feed_sort_method,
            preferred_tags = saved.preferred_tags.len(),
            excluded_tags = saved.excluded_tags.len(),
            "Updated feed preferences"
        );

        Ok(saved)
    }
}
