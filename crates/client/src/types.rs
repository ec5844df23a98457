//! Wire types shared with the Keystone authentication backend
//!
//! Field names follow the backend's JSON conventions (camelCase).

use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name for the account
    pub name: String,
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// The refresh token to exchange
    pub refresh_token: String,
}

/// Token pair returned by login, registration and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Short-lived access token
    pub access_token: String,
    /// Longer-lived refresh token
    pub refresh_token: String,
}

/// Standardized error body returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}
