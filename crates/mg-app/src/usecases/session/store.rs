//! Session token persistence policy.

use std::sync::Arc;

use tracing::warn;

use mg_core::ports::{StorageError, TokenStorePort};
use mg_core::session::SessionToken;

/// Policy wrapper over the token store port.
///
/// An unreadable token is operationally identical to no token, and logout
/// must always appear to succeed, so read and clear failures are logged and
/// swallowed here. Only `save` propagates: sign-in has to know when the
/// token did not persist.
pub struct SessionStore {
    store: Arc<dyn TokenStorePort>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn TokenStorePort>) -> Self {
        Self { store }
    }

    /// Persist a fresh token, replacing any previous one.
    pub async fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
        self.store.save(token).await
    }

    /// Read the stored token. Failures degrade to "absent".
    pub async fn get(&self) -> Option<SessionToken> {
        match self.store.load().await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "token read failed, treating session as absent");
                None
            }
        }
    }

    /// Remove the stored token. Always appears to succeed.
    pub async fn clear(&self) {
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "token clear failed, ignoring");
        }
    }
}
