//! Driven port for persisting the bearer token between runs.

use std::sync::Mutex;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::AccessToken;

define_port_error! {
    /// Errors raised by token persistence.
    pub enum TokenStoreError {
        /// The backing storage could not be read or written.
        Io { message: String } => "token storage failed: {message}",
    }
}

/// Port for the single persisted token slot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the persisted token; `None` when nothing is stored.
    async fn load(&self) -> Result<Option<AccessToken>, TokenStoreError>;

    /// Replace the persisted token.
    async fn save(&self, token: &AccessToken) -> Result<(), TokenStoreError>;

    /// Remove the persisted token. Clearing an empty slot succeeds.
    async fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Process-local token slot.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    slot: Mutex<Option<AccessToken>>,
}

impl InMemoryTokenStore {
    /// Start with `token` already persisted.
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }

    /// Snapshot of the slot without going through the async port.
    pub fn current(&self) -> Option<AccessToken> {
        self.slot
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn replace(&self, value: Option<AccessToken>) {
        match self.slot.lock() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<AccessToken>, TokenStoreError> {
        Ok(self.current())
    }

    async fn save(&self, token: &AccessToken) -> Result<(), TokenStoreError> {
        self.replace(Some(token.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        self.replace(None);
        Ok(())
    }
}
