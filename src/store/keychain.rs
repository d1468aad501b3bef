//! OS keychain backend for credential storage.
//!
//! Uses the `keyring` crate (apple-native on macOS, Secret Service or the
//! Windows credential manager elsewhere). Each logical key becomes one
//! keychain entry under a fixed service name.

use keyring::Entry;

use super::{KeyValueStore, StoreError};

/// Keychain service name shared by every entry the client writes.
pub const SERVICE_NAME: &str = "com.edulearn.client";

#[derive(Debug, Clone)]
pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Scope entries under a different service name (one per backend origin).
    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StoreError> {
        Ok(Entry::new(&self.service, key)?)
    }
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for KeychainStore {
    /// Returns `None` if no entry exists (never stored or already cleared).
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::from(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entry(key)?.set_password(value)?;
        Ok(())
    }

    /// Idempotent: a missing entry is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StoreError::from(e)),
        }
    }
}
