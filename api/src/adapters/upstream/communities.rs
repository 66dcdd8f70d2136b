//! Community service client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::client::{HttpServiceClient, NO_QUERY};
use crate::domain::entities::{CommunityId, UserId};
use crate::domain::ports::CommunityService;
use crate::error::UpstreamError;

#[derive(Deserialize)]
struct CommunityRef {
    id: CommunityId,
}

#[derive(Deserialize)]
struct JoinedCommunitiesResponse {
    #[serde(default)]
    communities: Option<Vec<CommunityRef>>,
}

impl JoinedCommunitiesResponse {
    fn into_ids(self) -> Vec<CommunityId> {
        self.communities
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.id)
            .collect()
    }
}

/// Reads memberships from `GET {base}/user/{id}/communities`
pub struct HttpCommunityService {
    client: HttpServiceClient,
}

impl HttpCommunityService {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            client: HttpServiceClient::new(http, base_url, "community"),
        }
    }

    fn path(user_id: UserId) -> String {
        format!("/user/{}/communities", user_id)
    }
}

#[async_trait]
impl CommunityService for HttpCommunityService {
    async fn joined_communities(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CommunityId>, UpstreamError> {
        let response: JoinedCommunitiesResponse =
            self.client.get_json(&Self::path(user_id), NO_QUERY).await?;
        Ok(response.into_ids())
    }
}
