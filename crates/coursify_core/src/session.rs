//! crates/coursify_core/src/session.rs
//!
//! An in-memory `SessionStore`, used for ephemeral runs and in tests.

use crate::domain::{Role, SessionToken};
use crate::ports::{PortError, PortResult, SessionStore};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    tokens: Mutex<HashMap<Role, SessionToken>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token` for `role`.
    pub fn with_token(role: Role, token: SessionToken) -> Self {
        let store = Self::new();
        if let Ok(mut tokens) = store.tokens.lock() {
            tokens.insert(role, token);
        }
        store
    }

    fn lock(&self) -> PortResult<std::sync::MutexGuard<'_, HashMap<Role, SessionToken>>> {
        self.tokens
            .lock()
            .map_err(|_| PortError::Storage("session store lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, role: Role) -> PortResult<Option<SessionToken>> {
        Ok(self.lock()?.get(&role).cloned())
    }

    fn set(&self, role: Role, token: SessionToken) -> PortResult<()> {
        self.lock()?.insert(role, token);
        Ok(())
    }

    fn clear(&self, role: Role) -> PortResult<()> {
        self.lock()?.remove(&role);
        Ok(())
    }
}
