//! Session state for one client run.
//!
//! Ties the credential store, the API client and the cancellation token
//! together. Views (CLI commands) borrow the `ApiClient` from here; tearing
//! a view down means cancelling `cancel`, which aborts whatever request it
//! has in flight.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::types::Profile;
use crate::api::ApiClient;
use crate::config::{ClientConfig, StoreKind};
use crate::store::{CredentialStore, FileStore, KeychainStore, StoreError};

pub struct AppState {
    /// Client whose requests are scoped to `cancel`.
    pub api: ApiClient,

    /// Token and profile persisted between runs.
    pub credentials: Arc<CredentialStore>,

    cancel: CancellationToken,
}

impl AppState {
    pub fn new(config: &ClientConfig, credentials: CredentialStore) -> Self {
        let credentials = Arc::new(credentials);
        let cancel = CancellationToken::new();
        let api = ApiClient::new(config, credentials.clone()).scoped(cancel.clone());
        Self {
            api,
            credentials,
            cancel,
        }
    }

    /// Build state over the chosen credential backend.
    pub fn open(config: &ClientConfig, store: StoreKind) -> Result<Self, StoreError> {
        let credentials = match store {
            StoreKind::Keychain => CredentialStore::new(KeychainStore::new()),
            StoreKind::File => {
                let file = FileStore::default_location()?;
                log::debug!("Using credential file {}", file.path().display());
                CredentialStore::new(file)
            }
            StoreKind::Memory => CredentialStore::in_memory(),
        };
        Ok(Self::new(config, credentials))
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Profile cached by the last login/register/me, without a network call.
    pub fn current_user(&self) -> Option<Profile> {
        self.credentials.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.token().is_some()
    }

    /// Logout: tell the backend (best effort), then clear local credentials.
    ///
    /// Local state is cleared even if the server is unreachable or rejects
    /// the call.
    pub async fn end_session(&self) -> Result<(), StoreError> {
        log::info!("Logging out");

        if let Err(e) = self.api.auth().logout().await {
            log::warn!("Logout request failed (will continue local cleanup): {}", e);
        }

        self.credentials.clear()?;

        log::info!("Logout complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::ApiError;
    use crate::testing::{MockServer, Reply};

    fn logged_in_state(server: &MockServer) -> AppState {
        let store = CredentialStore::in_memory();
        store.set_token(Some("T")).unwrap();
        AppState::new(&ClientConfig::new(&server.base_url), store)
    }

    #[tokio::test]
    async fn test_end_session_clears_after_server_logout() {
        let server = MockServer::start().await;
        server.on("POST", "/auth/logout", Reply::json(200, json!({"status": "success"})));
        let state = logged_in_state(&server);
        assert!(state.is_authenticated());

        state.end_session().await.unwrap();

        assert!(!state.is_authenticated());
        assert_eq!(state.current_user(), None);
        assert_eq!(server.received()[0].headers["authorization"], "Bearer T");
    }

    #[tokio::test]
    async fn test_end_session_clears_even_when_server_rejects() {
        let server = MockServer::start().await;
        server.on("POST", "/auth/logout", Reply::json(500, json!({"error": "down"})));
        let state = logged_in_state(&server);

        state.end_session().await.unwrap();

        assert!(!state.is_authenticated());
    }

    #[tokio::test]
    async fn test_cancel_token_scopes_state_client() {
        let server = MockServer::start().await;
        let state = logged_in_state(&server);

        state.cancel_token().cancel();
        let err = state.api.lessons().list(None).await.unwrap_err();

        assert!(matches!(err, ApiError::Cancelled));
        assert!(server.received().is_empty());
    }
}
