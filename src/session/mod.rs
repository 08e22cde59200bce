//! Session token storage
//!
//! The session token is an opaque bearer credential kept under a single fixed
//! key. The request pipeline only ever reads it; login writes it and logout
//! clears it.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;

mod file;

pub use file::FileSessionStore;

/// Storage key under which the session token lives
pub const TOKEN_KEY: &str = "token";

/// Key/value storage holding the current session token
pub trait SessionStore: Send + Sync {
    /// Current token, if one is stored
    fn get(&self) -> Option<String>;

    /// Replace the stored token
    fn set(&self, token: &str) -> Result<()>;

    /// Remove the stored token
    fn clear(&self) -> Result<()>;
}

/// In-process session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(TOKEN_KEY.to_string(), token.into());
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(TOKEN_KEY)
            .cloned()
    }

    fn set(&self, token: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(TOKEN_KEY.to_string(), token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(TOKEN_KEY);
        Ok(())
    }
}
