//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{CommunityId, Post, PreferenceId, UserId, UserPreference};

/// A fresh, valid 24 hex digit post id
pub fn test_post_id() -> String {
    Uuid::new_v4().simple().to_string()[..24].to_string()
}

/// Create a test post with default values
pub fn test_post() -> Post {
    Post {
        id: test_post_id(),
        user_id: 100,
        community_id: 1,
        title: "Test Post".to_string(),
        content: "This is a test post body.".to_string(),
        media_urls: vec![],
        tags: vec![],
        created_at: Utc::now(),
        like_count: 0,
        user_name: "test-author".to_string(),
        user_pic: String::new(),
    }
}

/// Create a test post with the fields scoring cares about
pub fn test_post_with(
    community_id: CommunityId,
    tags: &[&str],
    like_count: i64,
    created_at: DateTime<Utc>,
) -> Post {
    Post {
        community_id,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        like_count,
        created_at,
        ..test_post()
    }
}

/// Create stored preferences (with an id) for a user
pub fn test_preference(user_id: UserId) -> UserPreference {
    UserPreference {
        id: Some(PreferenceId::new()),
        ..UserPreference::default_for(user_id)
    }
}
