//! Authenticated REST client bound to one platform's base URL and bearer
//! token.
//!
//! The client attaches the Authorization header to every request, enforces a
//! per-request timeout, and maps responses onto the [`PlatformError`]
//! taxonomy: 401/403 become [`PlatformError::Auth`], every other non-2xx
//! status and any transport failure becomes [`PlatformError::Transport`].
//! It performs no retries and no backoff; callers that need resilience
//! layer it on top.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::{PlatformError, Result};
use super::types::SecretString;

/// Bearer-authenticated JSON client for one platform API.
///
/// Stateless beyond its credential and base URL; cheap to clone and safe to
/// share across concurrent calls.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: Url,
    token: SecretString,
}

impl RestClient {
    /// Build a client bound to `base_url` with the given bearer token and
    /// per-request timeout.
    pub fn new(base_url: &str, token: SecretString, timeout: Duration) -> Result<Self> {
        if token.is_empty() {
            return Err(PlatformError::config("platform bearer token is required"));
        }

        let base_url = Url::parse(base_url)
            .map_err(|e| PlatformError::config(format!("invalid base URL '{}': {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlatformError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url, token })
    }

    /// The base URL this client is bound to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("GET {}", url);
        self.client.get(url).bearer_auth(self.token.expose_secret())
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("POST {}", url);
        self.client.post(url).bearer_auth(self.token.expose_secret())
    }

    /// Send a GET request and decode the JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).send().await.map_err(request_failed)?;
        Self::decode(check_status(response).await?).await
    }

    /// Send a POST request with a JSON body, discarding the response body.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let response = self.post(path).json(body).send().await.map_err(request_failed)?;
        check_status(response).await?;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|e| PlatformError::transport(format!("failed to read response body: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            // A 2xx response the platform promised to be JSON but is not
            // counts as a transport-level failure, not a caller error.
            PlatformError::transport(format!("failed to decode response: {}", e))
        })
    }
}

fn request_failed(err: reqwest::Error) -> PlatformError {
    PlatformError::transport(err.to_string())
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response.text().await.unwrap_or_else(|_| "<unable to read body>".to_string());
    debug!(status = status.as_u16(), "Platform request rejected");

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(PlatformError::auth(status.as_u16(), detail))
    } else {
        Err(PlatformError::transport_status(status.as_u16(), detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        let result =
            RestClient::new("https://api.example.com", SecretString::default(), Duration::from_secs(5));
        assert!(matches!(result.unwrap_err(), PlatformError::Config { .. }));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result =
            RestClient::new("not a url", SecretString::new("tok"), Duration::from_secs(5));
        assert!(matches!(result.unwrap_err(), PlatformError::Config { .. }));
    }

    #[test]
    fn test_url_joining_handles_trailing_slash() {
        let with_slash = RestClient::new(
            "https://api.example.com/api/v1/",
            SecretString::new("tok"),
            Duration::from_secs(5),
        )
        .unwrap();
        let without_slash = RestClient::new(
            "https://api.example.com/api/v1",
            SecretString::new("tok"),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(with_slash.url("/user"), "https://api.example.com/api/v1/user");
        assert_eq!(without_slash.url("/user"), "https://api.example.com/api/v1/user");
    }
}
