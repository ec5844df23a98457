//! Keystone session layer
//!
//! Owns the client side of the session lifecycle: an in-memory token store,
//! a session-aware API client that attaches the access token to every call,
//! and the refresh coordination that recovers from an expired access token
//! without forcing re-login. When recovery is impossible the session is torn
//! down: tokens cleared and the user sent back to the login surface.

pub mod client;
pub mod navigation;
pub mod store;
pub mod terminator;

pub use client::SessionClient;
pub use keystone_client::ClientError;
pub use navigation::Navigator;
pub use store::{TokenPair, TokenStore};
pub use terminator::SessionTerminator;
