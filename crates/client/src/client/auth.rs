//! Authentication API client methods

use super::KeystoneClient;
use crate::error::ClientError;
use crate::types::{LoginRequest, RefreshRequest, RegisterRequest, TokenResponse};

/// Path of the login endpoint
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Path of the registration endpoint
pub const REGISTER_PATH: &str = "/api/auth/register";

/// Path of the token refresh endpoint
pub const REFRESH_PATH: &str = "/api/auth/refresh";

impl KeystoneClient {
    /// Authenticate with email and password
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, LOGIN_PATH)
            .json(&request);
        self.execute(req).await
    }

    /// Register a new account
    pub async fn register(&self, request: RegisterRequest) -> Result<TokenResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, REGISTER_PATH)
            .json(&request);
        self.execute(req).await
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(
        &self,
        refresh_token: impl Into<String>,
    ) -> Result<TokenResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, REFRESH_PATH)
            .json(&RefreshRequest {
                refresh_token: refresh_token.into(),
            });
        self.execute(req).await
    }
}
