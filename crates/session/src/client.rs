//! Session-aware API client
//!
//! Wraps [`KeystoneClient`] with the token lifecycle: the current access
//! token is attached to every outbound call, and when a call comes back 401
//! the held refresh token is exchanged for a new pair exactly once and the
//! call replayed. A rejected refresh, a rejected replay, or a 401 with no
//! refresh token in hand all end the session.

use crate::navigation::Navigator;
use crate::store::TokenStore;
use crate::terminator::SessionTerminator;
use keystone_client::client::auth::REFRESH_PATH;
use keystone_client::{ClientError, KeystoneClient, LoginRequest, RegisterRequest};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Description of an in-flight call, sufficient to replay it
#[derive(Clone, Debug)]
struct PendingRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    /// Set when this call is a replay issued after a refresh; a request is
    /// retried at most once.
    retry: bool,
}

/// API client bound to a session
#[derive(Clone)]
pub struct SessionClient {
    api: KeystoneClient,
    store: TokenStore,
    terminator: SessionTerminator,
    /// Single-flight guard: at most one refresh call is in flight at a time;
    /// other rejected calls queue here and pick up the winner's outcome.
    refresh_gate: Arc<Mutex<()>>,
}

impl SessionClient {
    /// Create a session client over an API client and a shared token store
    pub fn new(api: KeystoneClient, store: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        let terminator = SessionTerminator::new(store.clone(), navigator);
        Self {
            api,
            store,
            terminator,
            refresh_gate: Arc::new(Mutex::new(())),
        }
    }

    /// The token store backing this session
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Authenticate and install the returned token pair
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), ClientError> {
        let tokens = self
            .api
            .login(LoginRequest {
                email: email.into(),
                password: password.into(),
            })
            .await?;
        self.store.set_tokens(tokens.access_token, tokens.refresh_token);
        info!("login succeeded; session established");
        Ok(())
    }

    /// Register a new account and install the returned token pair
    pub async fn register(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), ClientError> {
        let tokens = self
            .api
            .register(RegisterRequest {
                name: name.into(),
                email: email.into(),
                password: password.into(),
            })
            .await?;
        self.store.set_tokens(tokens.access_token, tokens.refresh_token);
        info!("registration succeeded; session established");
        Ok(())
    }

    /// Drop the session and navigate to the login surface
    pub fn logout(&self) {
        self.terminator.terminate();
    }

    /// GET a JSON resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(Method::GET, path, None).await
    }

    /// POST a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(Method::POST, path, Some(serde_json::to_value(body)?))
            .await
    }

    /// PUT a JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(Method::PUT, path, Some(serde_json::to_value(body)?))
            .await
    }

    /// DELETE a JSON resource
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(Method::DELETE, path, None).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        let request = PendingRequest {
            method,
            path: path.to_string(),
            body,
            retry: false,
        };
        let attached = self.store.access_token();
        match self.dispatch(&request, attached.as_deref()).await {
            Err(err) if err.is_auth_expired() => self.recover(request, attached, err).await,
            outcome => outcome,
        }
    }

    /// Execute one call with the given access token attached
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: &PendingRequest,
        access: Option<&str>,
    ) -> Result<T, ClientError> {
        let mut builder = self.api.request(request.method.clone(), &request.path);
        if let Some(access) = access {
            builder = builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {access}"));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        self.api.execute(builder).await
    }

    /// Drive one refresh episode for a rejected call
    ///
    /// `failed_access` is the token the rejected call actually carried, not
    /// whatever the store holds by the time the 401 is processed; the two
    /// differ when another call's episode rotates the pair in between.
    async fn recover<T: DeserializeOwned>(
        &self,
        request: PendingRequest,
        failed_access: Option<String>,
        original: ClientError,
    ) -> Result<T, ClientError> {
        // A replay that is rejected again, or a 401 from the refresh endpoint
        // itself, is terminal; recursing here would loop forever.
        if request.retry || request.path == REFRESH_PATH {
            self.terminator.terminate();
            return Err(original);
        }

        // Queue on the guard: every other rejected call waits here for the
        // in-flight episode to settle.
        let guard = self.refresh_gate.lock().await;

        // Another call's episode may already have rotated the pair; replay
        // with the fresh token instead of refreshing again.
        if self.store.is_authenticated() && self.store.access_token() != failed_access {
            drop(guard);
            return Box::pin(self.replay(request)).await;
        }

        // A session torn down while we waited stays down, and a session that
        // never held a refresh token cannot recover.
        let Some(refresh_token) = self.store.refresh_token() else {
            self.terminator.terminate();
            return Err(original);
        };

        debug!(path = %request.path, "access token rejected; refreshing");
        match self.api.refresh(refresh_token).await {
            Ok(tokens) => {
                self.store.set_tokens(tokens.access_token, tokens.refresh_token);
                info!("token pair rotated");
                drop(guard);
                Box::pin(self.replay(request)).await
            }
            Err(refresh_err) => {
                debug!(error = %refresh_err, "refresh rejected; ending session");
                self.terminator.terminate();
                // The caller sees its own call's failure, not the refresh
                // call's.
                Err(original)
            }
        }
    }

    /// Reissue a call once after a refresh
    ///
    /// Re-reads the store so the replay carries the just-installed token.
    async fn replay<T: DeserializeOwned>(
        &self,
        mut request: PendingRequest,
    ) -> Result<T, ClientError> {
        request.retry = true;
        let attached = self.store.access_token();
        match self.dispatch(&request, attached.as_deref()).await {
            Err(err) if err.is_auth_expired() => self.recover(request, attached, err).await,
            outcome => outcome,
        }
    }
}
