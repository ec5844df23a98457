//! Forced session teardown

use crate::navigation::Navigator;
use crate::store::TokenStore;
use std::sync::Arc;
use tracing::warn;

/// Clears session state and forces navigation to the login surface
///
/// Idempotent: terminating an already-terminated session repeats the clear
/// and redirect with no further effect.
#[derive(Clone)]
pub struct SessionTerminator {
    store: TokenStore,
    navigator: Arc<dyn Navigator>,
}

impl SessionTerminator {
    /// Create a terminator over the given store and navigation capability
    pub fn new(store: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// End the session: drop both tokens, then redirect
    pub fn terminate(&self) {
        warn!("session terminated; redirecting to login");
        self.store.clear();
        self.navigator.redirect_to_login();
    }
}
