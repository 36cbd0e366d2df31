//! Secret storage seam for API credentials
//!
//! The core never persists credentials itself; platforms plug in their own
//! store (OS keychain, credential manager, encrypted file) behind this trait.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::Result;

/// Store key for the API auth token
pub const KEY_AUTH_TOKEN: &str = "api_auth_token";

/// Store key for the API auth secret
pub const KEY_AUTH_SECRET: &str = "api_auth_secret";

/// Key/value secret store
pub trait SecretStore: Send + Sync {
    /// Look up a secret; `None` when the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store or overwrite a secret.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a secret; no-op when absent.
    fn delete(&self, key: &str) -> Result<()>;
}

/// In-memory store for tests and for sessions fed from the environment.
#[derive(Default)]
pub struct MemorySecretStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from environment variables, the non-keychain fallback
    /// used by the CLI (`CALLBOX_API_TOKEN` / `CALLBOX_API_SECRET`).
    pub fn from_env() -> Self {
        let store = Self::new();
        if let Ok(token) = std::env::var("CALLBOX_API_TOKEN") {
            let _ = store.set(KEY_AUTH_TOKEN, &token);
        }
        if let Ok(secret) = std::env::var("CALLBOX_API_SECRET") {
            let _ = store.set(KEY_AUTH_SECRET, &secret);
        }
        store
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }
}
