//! Domain layer
//!
//! Feed preferences, upstream posts and the assembled feed, with no
//! knowledge of HTTP or storage.
//! - `entities`: Preference, post and feed models
//! - `ports`: Traits for the preference store and the upstream services

pub mod entities;
pub mod ports;
