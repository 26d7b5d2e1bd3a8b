//! Token persistence
//!
//! Access token, refresh token and user id are kept in a key-value
//! [`TokenStore`]. The OS keyring backs it in production; tests use the
//! in-memory store.

use super::Result;
use crate::error::StorageError;
use keyring::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

const KEYRING_SERVICE: &str = "school-cli";

/// Keys persisted for an authenticated session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    AccessToken,
    RefreshToken,
    UserId,
}

impl TokenKey {
    pub const ALL: [TokenKey; 3] = [
        TokenKey::AccessToken,
        TokenKey::RefreshToken,
        TokenKey::UserId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKey::AccessToken => "access_token",
            TokenKey::RefreshToken => "refresh_token",
            TokenKey::UserId => "user_id",
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secure key-value storage for session tokens
pub trait TokenStore: Send + Sync + fmt::Debug {
    fn load(&self, key: TokenKey) -> Result<Option<String>>;
    fn save(&self, key: TokenKey, value: &str) -> Result<()>;
    /// Removing a missing key is not an error
    fn delete(&self, key: TokenKey) -> Result<()>;
}

/// OS keyring backed store, one entry per key and profile
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    profile_name: String,
}

impl KeyringTokenStore {
    pub fn new(profile_name: impl Into<String>) -> Self {
        Self {
            profile_name: profile_name.into(),
        }
    }

    fn entry(&self, key: TokenKey) -> Result<Entry> {
        Entry::new(KEYRING_SERVICE, &format!("{}-{}", key, self.profile_name))
            .map_err(|e| StorageError::KeyringError(e.to_string()))
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self, key: TokenKey) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(v) => Ok(Some(v)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::KeyringError(e.to_string())),
        }
    }

    fn save(&self, key: TokenKey, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| StorageError::KeyringError(e.to_string()))
    }

    fn delete(&self, key: TokenKey) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(_) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::KeyringError(e.to_string())),
        }
    }
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<TokenKey, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (TokenKey, String)>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self, key: TokenKey) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(&key).cloned())
    }

    fn save(&self, key: TokenKey, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key, value.to_string());
        Ok(())
    }

    fn delete(&self, key: TokenKey) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        entries.remove(&key);
        Ok(())
    }
}
