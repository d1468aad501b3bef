//! Persisted credential storage.
//!
//! The bearer token and the last known user profile are kept in a durable
//! key-value backend (keychain, JSON file or memory). `CredentialStore` is
//! the session object injected into `ApiClient`; every read goes to the
//! backend and every write is flushed immediately.

pub mod file;
pub mod keychain;
pub mod memory;

pub use file::FileStore;
pub use keychain::KeychainStore;
pub use memory::MemoryStore;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::api::types::Profile;

/// Key holding the JSON-encoded bearer token.
pub const TOKEN_KEY: &str = "edulearn_token";

/// Key holding the JSON-encoded user profile.
pub const USER_KEY: &str = "edulearn_user";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Keychain operation failed: {0}")]
    Keychain(#[from] keyring::Error),

    #[error("Credential file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No configuration directory available for credential file")]
    NoConfigDir,

    #[error("Credential store lock poisoned")]
    Poisoned,
}

/// Synchronous string key-value backend.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a key that does not exist succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Token and profile persistence on top of a `KeyValueStore`.
///
/// Token and profile are independent keys: callers that want both set or
/// both cleared must do so explicitly (`clear()` for the latter). Reads
/// never fail; malformed or unreadable data is reported as absent.
pub struct CredentialStore {
    backend: Box<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// A store backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// The stored bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.read_json(TOKEN_KEY)
    }

    /// Store the token, or remove it entirely for `None` or an empty string.
    pub fn set_token(&self, token: Option<&str>) -> Result<(), StoreError> {
        self.write_json(TOKEN_KEY, token.filter(|t| !t.is_empty()))
    }

    /// The cached profile from the last successful auth call, if any.
    pub fn user(&self) -> Option<Profile> {
        self.read_json(USER_KEY)
    }

    pub fn set_user(&self, user: Option<&Profile>) -> Result<(), StoreError> {
        self.write_json(USER_KEY, user)
    }

    /// Remove both token and profile.
    ///
    /// Both removals are attempted even if the first fails; the first error
    /// is returned.
    pub fn clear(&self) -> Result<(), StoreError> {
        let token = self.backend.remove(TOKEN_KEY);
        let user = self.backend.remove(USER_KEY);
        token.and(user)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read {} from credential store: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed {} in credential store: {}", key, e);
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: Option<&T>,
    ) -> Result<(), StoreError> {
        match value {
            Some(value) => self.backend.set(key, &serde_json::to_string(value)?),
            None => self.backend.remove(key),
        }
    }
}

impl fmt::Debug for CredentialStore {
    // Never print the token.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}
