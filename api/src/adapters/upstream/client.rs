//! Shared HTTP plumbing for upstream services

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::UpstreamError;

/// Query parameters for requests that take none
pub const NO_QUERY: &[(&str, &str)] = &[];

/// Build the HTTP client shared by every upstream service
pub fn build_http_client(timeout: Duration) -> Result<Client, UpstreamError> {
    let client = Client::builder()
        .user_agent(concat!("circle-feed-api/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// A JSON API rooted at a base URL
pub struct HttpServiceClient {
    http: Client,
    base_url: String,
    service: &'static str,
}

impl HttpServiceClient {
    pub fn new(http: Client, base_url: &str, service: &'static str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` with query parameters and decode the JSON body
    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(service = self.service, url = %url, "Calling upstream service");

        let response = self.http.get(&url).query(query).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, UpstreamError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| UpstreamError::Deserialization(e.to_string()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(UpstreamError::Api {
                service: self.service,
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Ping {
        ok: bool,
    }

    fn client() -> HttpServiceClient {
        HttpServiceClient::new(Client::new(), "http://posts.local/api/", "post")
    }

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        axum::http::Response::builder()
            .status(status)
            .body(body)
            .unwrap()
            .into()
    }

    #[test]
    fn url_trims_trailing_slash() {
        assert_eq!(client().url("/posts"), "http://posts.local/api/posts");
    }

    #[tokio::test]
    async fn success_decodes_body() {
        let ping: Ping = client()
            .handle_response(response(200, r#"{"ok": true}"#))
            .await
            .unwrap();
        assert!(ping.ok);
    }

    #[tokio::test]
    async fn error_status_keeps_body() {
        let result: Result<Ping, _> = client()
            .handle_response(response(503, "maintenance"))
            .await;

        match result {
            Err(UpstreamError::Api {
                service,
                status,
                message,
            }) => {
                assert_eq!(service, "post");
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_deserialization_error() {
        let result: Result<Ping, _> = client().handle_response(response(200, "<html>")).await;
        assert!(matches!(result, Err(UpstreamError::Deserialization(_))));
    }
}
