//! Post service client

use async_trait::async_trait;
use reqwest::Client;

use super::client::HttpServiceClient;
use crate::domain::entities::{PostPage, PostQuery};
use crate::domain::ports::PostService;
use crate::error::UpstreamError;

/// Reads posts from `GET {base}/posts`
pub struct HttpPostService {
    client: HttpServiceClient,
}

impl HttpPostService {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            client: HttpServiceClient::new(http, base_url, "post"),
        }
    }
}

#[async_trait]
impl PostService for HttpPostService {
    async fn list_posts(&self, query: &PostQuery) -> Result<PostPage, UpstreamError> {
        self.client.get_json("/posts", &query.to_params()).await
    }
}
