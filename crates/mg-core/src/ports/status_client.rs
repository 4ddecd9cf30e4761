//! Onboarding status port.

use async_trait::async_trait;
use thiserror::Error;

use crate::session::{OnboardingStatus, SessionToken};

/// Status endpoint errors, classified by the adapter.
#[derive(Debug, Error)]
pub enum StatusError {
    /// The backend rejected the token as invalid or expired. Never retried;
    /// callers treat this exactly like "no session".
    #[error("session rejected: {0}")]
    Auth(String),

    /// Network or server trouble that survived the bounded retries.
    #[error("status endpoint unreachable: {0}")]
    Transport(String),
}

/// Authoritative onboarding/session status lookup.
///
/// Callers short-circuit the no-token case themselves; this port is never
/// invoked without a token.
#[async_trait]
pub trait StatusClientPort: Send + Sync {
    async fn check_session(&self, token: &SessionToken)
        -> Result<OnboardingStatus, StatusError>;
}
