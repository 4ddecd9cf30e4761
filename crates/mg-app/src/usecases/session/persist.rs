//! Persist the token minted by a successful sign-in.

use std::sync::Arc;

use tracing::info;

use mg_core::session::SessionToken;

use crate::usecases::session::SessionStore;

/// Use case for storing a freshly issued session token.
pub struct PersistSession {
    session_store: Arc<SessionStore>,
}

impl PersistSession {
    pub fn new(session_store: Arc<SessionStore>) -> Self {
        Self { session_store }
    }

    /// Validate and store the raw token string the auth endpoint returned.
    ///
    /// Unlike reads and clears, persistence failures propagate: the sign-in
    /// flow has to know the session will not survive a restart.
    pub async fn execute(&self, raw_token: String) -> anyhow::Result<()> {
        let token = SessionToken::new(raw_token)
            .ok_or_else(|| anyhow::anyhow!("refusing to store a blank session token"))?;
        self.session_store.save(&token).await?;
        info!("session token persisted");
        Ok(())
    }
}
