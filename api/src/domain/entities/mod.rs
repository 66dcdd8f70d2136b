//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod feed;
pub mod post;
pub mod preference;

pub use feed::{Feed, FeedItem, FeedParams, FeedQuery};
pub use post::{Post, PostId, PostOrder, PostPage, PostQuery, UserProfile};
pub use preference::{
    CommunityId, PreferenceId, SortMethod, UpdatePreferences, UserId, UserPreference,
};
