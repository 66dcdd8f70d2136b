//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    CommunityId, PostPage, PostQuery, PreferenceId, UserId, UserPreference, UserProfile,
};
use crate::domain::ports::{CommunityService, PostService, PreferenceRepository, UserService};
use crate::error::{DomainError, UpstreamError};

fn unavailable(service: &'static str) -> UpstreamError {
    UpstreamError::Api {
        service,
        status: 503,
        message: "service unavailable".to_string(),
    }
}

// ============================================================================
// In-Memory Preference Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPreferenceRepository {
    preferences: Arc<RwLock<HashMap<UserId, UserPreference>>>,
    fail: bool,
}

impl InMemoryPreferenceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with preferences for testing
    pub fn with_preference(self, preference: UserPreference) -> Self {
        self.preferences
            .write()
            .unwrap()
            .insert(preference.user_id, preference);
        self
    }

    /// Every call returns a database error
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail {
            Err(DomainError::Database("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryPreferenceRepository {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<UserPreference>, DomainError> {
        self.check()?;
        let preferences = self.preferences.read().unwrap();
        Ok(preferences.get(&user_id).cloned())
    }

    async fn save(&self, preference: &UserPreference) -> Result<UserPreference, DomainError> {
        self.check()?;
        let mut preferences = self.preferences.write().unwrap();
        let mut saved = preference.clone();
        saved.id = preferences
            .get(&saved.user_id)
            .and_then(|stored| stored.id)
            .or(saved.id)
            .or_else(|| Some(PreferenceId::new()));

        preferences.insert(saved.user_id, saved.clone());
        Ok(saved)
    }
}

// ============================================================================
// Mock Post Service
// ============================================================================

/// Serves one fixed page and records every query it receives
#[derive(Default)]
pub struct MockPostService {
    page: PostPage,
    fail: bool,
    queries: RwLock<Vec<PostQuery>>,
}

impl MockPostService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PostPage) -> Self {
        self.page = page;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn recorded_queries(&self) -> Vec<PostQuery> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl PostService for MockPostService {
    async fn list_posts(&self, query: &PostQuery) -> Result<PostPage, UpstreamError> {
        self.queries.write().unwrap().push(query.clone());
        if self.fail {
            return Err(unavailable("post"));
        }
        Ok(self.page.clone())
    }
}

// ============================================================================
// Mock Community Service
// ============================================================================

#[derive(Default)]
pub struct MockCommunityService {
    memberships: HashMap<UserId, Vec<CommunityId>>,
    fail: bool,
}

impl MockCommunityService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_membership(mut self, user_id: UserId, communities: Vec<CommunityId>) -> Self {
        self.memberships.insert(user_id, communities);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl CommunityService for MockCommunityService {
    async fn joined_communities(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CommunityId>, UpstreamError> {
        if self.fail {
            return Err(unavailable("community"));
        }
        Ok(self.memberships.get(&user_id).cloned().unwrap_or_default())
    }
}

// ============================================================================
// Mock User Service
// ============================================================================

#[derive(Default)]
pub struct MockUserService {
    profiles: HashMap<UserId, UserProfile>,
    fail: bool,
}

impl MockUserService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, user_id: UserId, profile: UserProfile) -> Self {
        self.profiles.insert(user_id, profile);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl UserService for MockUserService {
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, UpstreamError> {
        if self.fail {
            return Err(unavailable("user"));
        }
        self.profiles
            .get(&user_id)
            .cloned()
            .ok_or_else(|| UpstreamError::Api {
                service: "user",
                status: 404,
                message: format!("user {} not found", user_id),
            })
    }
}
