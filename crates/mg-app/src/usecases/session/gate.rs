//! Startup session gate.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{info, info_span, warn, Instrument};

use mg_core::ports::{StatusClientPort, StatusError};

use crate::usecases::session::SessionStore;

/// Top-level stack chosen at application start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackChoice {
    /// Unauthenticated flow; onboarding lives inside it.
    Auth,
    /// Authenticated main experience.
    Main,
}

/// Decides, at application start, whether the user lands in the Auth or
/// Main stack.
///
/// The decision is strictly sequential: read the token, then check it with
/// the backend. Every failure resolves to `Auth`; the gate never leaves the
/// user on an indefinite loading state.
pub struct SessionGate {
    session_store: Arc<SessionStore>,
    status_client: Arc<dyn StatusClientPort>,
    startup_budget: Duration,
}

impl SessionGate {
    pub fn new(
        session_store: Arc<SessionStore>,
        status_client: Arc<dyn StatusClientPort>,
        startup_budget: Duration,
    ) -> Self {
        Self {
            session_store,
            status_client,
            startup_budget,
        }
    }

    /// Resolve the top-level stack. Terminates within the startup budget.
    pub async fn resolve(&self) -> StackChoice {
        let span = info_span!("usecase.session_gate.resolve");
        async {
            match time::timeout(self.startup_budget, self.decide()).await {
                Ok(choice) => {
                    info!(?choice, "startup routing resolved");
                    choice
                }
                Err(_) => {
                    warn!(
                        budget_ms = self.startup_budget.as_millis() as u64,
                        "startup routing timed out, falling back to auth stack"
                    );
                    StackChoice::Auth
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn decide(&self) -> StackChoice {
        let token = match self.session_store.get().await {
            Some(token) => token,
            None => {
                info!("no stored session, routing to auth stack");
                return StackChoice::Auth;
            }
        };

        match self.status_client.check_session(&token).await {
            Ok(status) if !status.authenticated => {
                info!("backend reports session unauthenticated, clearing token");
                self.session_store.clear().await;
                StackChoice::Auth
            }
            Ok(status) if status.onboarding_completed => StackChoice::Main,
            // Authenticated but mid-onboarding: the progression engine
            // inside the auth stack takes over from here.
            Ok(_) => StackChoice::Auth,
            Err(StatusError::Auth(reason)) => {
                info!(%reason, "backend rejected session, clearing token");
                self.session_store.clear().await;
                StackChoice::Auth
            }
            // Routing fails safe, but a flaky network must not destroy a
            // session the backend never rejected: the token stays.
            Err(StatusError::Transport(reason)) => {
                warn!(%reason, "status check unreachable, routing to auth stack");
                StackChoice::Auth
            }
        }
    }
}
