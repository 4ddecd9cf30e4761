//! Sign out.

use std::sync::Arc;

use tracing::info;

use crate::event::{FlowEvent, Notifier};
use crate::usecases::session::SessionStore;

/// Use case for signing the user out.
///
/// Clears the stored session and announces it. From the user's point of
/// view logout always succeeds; storage trouble is already swallowed one
/// layer down.
pub struct SignOut {
    session_store: Arc<SessionStore>,
    notifier: Notifier<FlowEvent>,
}

impl SignOut {
    pub fn new(session_store: Arc<SessionStore>, notifier: Notifier<FlowEvent>) -> Self {
        Self {
            session_store,
            notifier,
        }
    }

    pub async fn execute(&self) {
        self.session_store.clear().await;
        self.notifier.emit(FlowEvent::SessionCleared);
        info!("signed out, session cleared");
    }
}
