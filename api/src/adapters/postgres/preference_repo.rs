//! PostgreSQL adapter for PreferenceRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::de::DeserializeOwned;

use crate::domain::entities::{PreferenceId, SortMethod, UserId, UserPreference};
use crate::domain::ports::PreferenceRepository;
use crate::entity::feed_preferences;
use crate::error::DomainError;

/// PostgreSQL implementation of PreferenceRepository
pub struct PostgresPreferenceRepository {
    db: DatabaseConnection,
}

impl PostgresPreferenceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferenceRepository for PostgresPreferenceRepository {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<UserPreference>, DomainError> {
        let result = feed_preferences::Entity::find()
            .filter(feed_preferences::Column::UserId.eq(user_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn save(&self, preference: &UserPreference) -> Result<UserPreference, DomainError> {
        let id = preference.id.unwrap_or_default();

        let model = feed_preferences::ActiveModel {
            id: Set(id.0),
            user_id: Set(preference.user_id.0),
            feed_sort_method: Set(preference.feed_sort_method.to_string()),
            preferred_tags: Set(to_json(&preference.preferred_tags)?),
            excluded_tags: Set(to_json(&preference.excluded_tags)?),
            preferred_communities: Set(to_json(&preference.preferred_communities)?),
            updated_at: Set(preference.updated_at.fixed_offset()),
        };

        // Upsert keyed on user_id; an existing row keeps its id
        let result = feed_preferences::Entity::insert(model)
            .on_conflict(
                OnConflict::column(feed_preferences::Column::UserId)
                    .update_columns([
                        feed_preferences::Column::FeedSortMethod,
                        feed_preferences::Column::PreferredTags,
                        feed_preferences::Column::ExcludedTags,
                        feed_preferences::Column::PreferredCommunities,
                        feed_preferences::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| DomainError::Internal(e.to_string()))
}

/// Lenient read of a JSONB list column; malformed data reads as empty
fn from_json<T: DeserializeOwned + Default>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap_or_default()
}

/// Convert SeaORM model to domain entity
impl From<feed_preferences::Model> for UserPreference {
    fn from(model: feed_preferences::Model) -> Self {
        UserPreference {
            id: Some(PreferenceId(model.id)),
            user_id: UserId(model.user_id),
            feed_sort_method: model
                .feed_sort_method
                .parse()
                .unwrap_or(SortMethod::Date),
            preferred_tags: from_json(model.preferred_tags),
            excluded_tags: from_json(model.excluded_tags),
            preferred_communities: from_json(model.preferred_communities),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
