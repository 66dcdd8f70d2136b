//! User service client

use async_trait::async_trait;
use reqwest::Client;

use super::client::{HttpServiceClient, NO_QUERY};
use crate::domain::entities::{UserId, UserProfile};
use crate::domain::ports::UserService;
use crate::error::UpstreamError;

/// Reads profiles from `GET {base}/users/{id}`
pub struct HttpUserService {
    client: HttpServiceClient,
}

impl HttpUserService {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            client: HttpServiceClient::new(http, base_url, "user"),
        }
    }
}

#[async_trait]
impl UserService for HttpUserService {
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, UpstreamError> {
        self.client
            .get_json(&format!("/users/{}", user_id), NO_QUERY)
            .await
    }
}
