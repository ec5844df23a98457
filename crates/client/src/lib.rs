//! Keystone API client
//!
//! Typed `reqwest`-based client for the Keystone authentication backend.
//! This crate covers transport only: building requests, decoding responses,
//! and mapping error statuses. Token storage and refresh coordination live
//! in `keystone-session`.

pub mod client;
pub mod error;
pub mod types;

pub use client::{KeystoneClient, KeystoneClientBuilder};
pub use error::ClientError;
pub use types::{ErrorResponse, LoginRequest, RefreshRequest, RegisterRequest, TokenResponse};
