//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{UserId, UserPreference};
use crate::error::DomainError;

/// Repository for per-user feed preferences
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Find the preferences stored for a user
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<UserPreference>, DomainError>;

    /// Insert or replace the user's record, keyed on `user_id`.
    /// A record already stored for the user keeps its id.
    /// Returns the record as stored.
    async fn save(&self, preference: &UserPreference) -> Result<UserPreference, DomainError>;
}
