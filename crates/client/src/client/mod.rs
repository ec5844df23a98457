//! Keystone HTTP client

pub mod auth;

use crate::error::ClientError;
use crate::types::ErrorResponse;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Base URL used when `KEYSTONE_API_BASE_URL` is not set
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Keystone API client
#[derive(Clone)]
pub struct KeystoneClient {
    client: Client,
    base_url: String,
}

impl KeystoneClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> KeystoneClientBuilder {
        KeystoneClientBuilder::default()
    }

    /// Create a client from `KEYSTONE_API_BASE_URL`, falling back to the local backend
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var("KEYSTONE_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::builder().base_url(base_url).build()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder for a path relative to the base URL
    ///
    /// No credentials are attached here; authorized calls go through the
    /// session layer, which owns the current token pair.
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            // The backend sends a structured error body; fall back to raw text
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| {
                    if body.is_empty() {
                        status.to_string()
                    } else {
                        body
                    }
                });
            Err(ClientError::from_status(status, message))
        }
    }
}

/// Builder for KeystoneClient
#[derive(Default)]
pub struct KeystoneClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl KeystoneClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<KeystoneClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent("keystone-client/0.1.0");
        }

        let client = client_builder.build()?;

        Ok(KeystoneClient { client, base_url })
    }
}
