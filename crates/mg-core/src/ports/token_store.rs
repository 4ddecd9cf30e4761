//! Token store port.

use async_trait::async_trait;
use thiserror::Error;

use crate::session::SessionToken;

/// Token storage errors.
///
/// None of these ever reach the user: the application-layer session store
/// degrades every failure to "no session".
#[derive(Debug, Error)]
pub enum StorageError {
    /// Secure storage is unavailable on this platform.
    #[error("token storage unavailable: {0}")]
    Unavailable(String),

    /// Stored data is corrupt or unreadable.
    #[error("stored token corrupt: {0}")]
    Corrupt(String),

    /// Other storage failures.
    #[error("token storage failed: {0}")]
    Other(String),
}

/// Durable secure storage for the session token.
///
/// The store holds at most one token, keyed by a fixed service/key pair
/// chosen by the adapter.
#[async_trait]
pub trait TokenStorePort: Send + Sync {
    /// Persist the token, replacing any previous one.
    async fn save(&self, token: &SessionToken) -> Result<(), StorageError>;

    /// Read the stored token; `None` when nothing is stored.
    async fn load(&self) -> Result<Option<SessionToken>, StorageError>;

    /// Delete the stored token. Deleting an absent token succeeds.
    async fn clear(&self) -> Result<(), StorageError>;
}

#[cfg(test)]
mockall::mock! {
    pub TokenStore {}

    #[async_trait]
    impl TokenStorePort for TokenStore {
        async fn save(&self, token: &SessionToken) -> Result<(), StorageError>;
        async fn load(&self) -> Result<Option<SessionToken>, StorageError>;
        async fn clear(&self) -> Result<(), StorageError>;
    }
}
