//! In-memory token store

use std::sync::{Arc, RwLock};

/// An access/refresh credential pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived token attached to authorized calls
    pub access: String,
    /// Longer-lived token exchanged for a new pair
    pub refresh: String,
}

/// Shared holder of the current token pair
///
/// A pure value holder: no validation, no expiry checks, no notifications.
/// Both tokens are installed or cleared together; half a pair cannot be
/// populated through this interface. Cloning shares the same underlying
/// state, so one store instance can be handed to every collaborator of a
/// session.
#[derive(Clone, Debug, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<TokenPair>>>,
}

impl TokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Current access token, if any
    pub fn access_token(&self) -> Option<String> {
        self.read().as_ref().map(|pair| pair.access.clone())
    }

    /// Current refresh token, if any
    pub fn refresh_token(&self) -> Option<String> {
        self.read().as_ref().map(|pair| pair.refresh.clone())
    }

    /// Install a new pair, overwriting whatever was held
    pub fn set_tokens(&self, access: impl Into<String>, refresh: impl Into<String>) {
        *self.write() = Some(TokenPair {
            access: access.into(),
            refresh: refresh.into(),
        });
    }

    /// Drop both tokens
    pub fn clear(&self) {
        *self.write() = None;
    }

    /// Whether a session is currently held
    ///
    /// Route guards treat this as the "is authenticated" signal; they never
    /// need to understand the refresh protocol.
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<TokenPair>> {
        self.inner.read().expect("token store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<TokenPair>> {
        self.inner.write().expect("token store lock poisoned")
    }
}
