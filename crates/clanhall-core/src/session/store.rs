//! The injectable session store seam.
//!
//! The persister only ever talks to [`SessionStore`], so tests substitute
//! the in-memory implementation and production code injects the durable one
//! from the infrastructure crate.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{ApiError, Result};

/// Fixed key layout of the persisted session.
pub mod keys {
    pub const AUTH_TOKEN: &str = "auth_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const TOKEN_EXPIRY: &str = "token_expiry";
    pub const USER_PROFILE: &str = "user_profile";

    /// All session keys, in write order.
    pub const ALL: [&str; 4] = [AUTH_TOKEN, REFRESH_TOKEN, TOKEN_EXPIRY, USER_PROFILE];
}

/// A process-wide string key-value store holding session state.
///
/// Implementations must serialize writes internally; callers follow the
/// single-writer model (one session-mutating call per user action) but do
/// not hold any lock themselves.
pub trait SessionStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, overwriting any prior value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key` from the store. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory [`SessionStore`] used by tests and as a default fake.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current contents, for state assertions in tests.
    pub fn snapshot(&self) -> Result<HashMap<String, String>> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, String>>> {
        self.entries
            .read()
            .map_err(|_| ApiError::store("session store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.entries
            .write()
            .map_err(|_| ApiError::store("session store lock poisoned"))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.write()?.remove(key);
        Ok(())
    }
}
