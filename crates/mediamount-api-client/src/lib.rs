//! HTTP client for the media API.
//!
//! Provides a minimal client with configurable auth (Bearer token or X-API-Key)
//! and the upload operation used by the storage adapter. The storage crate
//! uses this client through the `RemoteUploader` trait.

pub mod upload;

use mediamount_core::constants::{DEFAULT_API_TIMEOUT_SECS, DEFAULT_API_VERSION};
use mediamount_core::{AuthScheme, MountConfig, MountError, MountResult};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// HTTP client for the media API with configurable auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_version: String,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Auth) -> MountResult<Self> {
        Self::with_timeout(base_url, auth, Duration::from_secs(DEFAULT_API_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: String, auth: Auth, timeout: Duration) -> MountResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MountError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            auth,
        })
    }

    /// Create a client from process configuration.
    pub fn from_config(config: &MountConfig) -> MountResult<Self> {
        let auth = match config.auth_scheme {
            AuthScheme::ApiKey => Auth::XApiKey(config.api_key.clone()),
            AuthScheme::Bearer => Auth::Bearer(config.api_key.clone()),
        };
        let client = Self::with_timeout(
            config.api_url.clone(),
            auth,
            Duration::from_secs(config.api_timeout_seconds),
        )?;
        Ok(client.with_api_version(config.api_version.clone()))
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API version prefix (e.g. "/api/v1").
    pub fn api_prefix(&self) -> String {
        format!("/api/{}", self.api_version)
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::XApiKey(key) => request.header("X-API-Key", key.as_str()),
        }
    }

    /// POST multipart form. Returns the status and raw body without judging success.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> MountResult<(StatusCode, String)> {
        let url = self.build_url(path);
        let request = self.client.post(&url).multipart(form);
        let request = self.apply_auth(request);

        let response = request
            .send()
            .await
            .map_err(|e| MountError::Http(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MountError::Http(format!("Failed to read response body: {}", e)))?;

        Ok((status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            ApiClient::new("http://media.local/".to_string(), Auth::XApiKey("k".into())).unwrap();
        assert_eq!(client.base_url(), "http://media.local");
        assert_eq!(
            client.build_url("/api/v1/auto/upload"),
            "http://media.local/api/v1/auto/upload"
        );
    }

    #[test]
    fn test_from_config_uses_scheme_and_version() {
        let config = MountConfig {
            api_url: "http://media.local/".to_string(),
            api_key: "secret".to_string(),
            auth_scheme: AuthScheme::Bearer,
            api_version: "v3".to_string(),
            api_timeout_seconds: 5,
            database_url: None,
            db_max_connections: 1,
            db_timeout_seconds: 1,
            environment: "test".to_string(),
            log_json: false,
        };
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://media.local");
        assert_eq!(client.api_prefix(), "/api/v3");
        assert!(matches!(client.auth, Auth::Bearer(ref token) if token == "secret"));
    }

    #[test]
    fn test_default_api_version() {
        let client =
            ApiClient::new("http://media.local".to_string(), Auth::XApiKey("k".into())).unwrap();
        assert_eq!(client.api_prefix(), format!("/api/{}", DEFAULT_API_VERSION));
    }

    #[test]
    fn test_api_prefix_follows_version() {
        let client = ApiClient::new("http://media.local".to_string(), Auth::Bearer("t".into()))
            .unwrap()
            .with_api_version("v2");
        assert_eq!(client.api_prefix(), "/api/v2");
    }
}
