//! Navigator port.

use async_trait::async_trait;
use thiserror::Error;

use crate::routing::Screen;

/// Navigation errors.
#[derive(Debug, Error)]
pub enum NavigatorError {
    /// The navigation container is gone; the shell tore it down.
    #[error("navigator closed")]
    Closed,
}

/// Opaque navigation side-effect sink.
///
/// `wait_ready` resolves once the container is mounted and accepting
/// commands. The progression engine awaits it before every command instead
/// of sleeping a fixed delay; a command issued before readiness must be
/// queued or delayed by the adapter, never dropped.
#[async_trait]
pub trait NavigatorPort: Send + Sync {
    /// Resolve once the navigation container can accept commands.
    async fn wait_ready(&self);

    /// Navigate to the named screen.
    async fn navigate(&self, screen: Screen) -> Result<(), NavigatorError>;
}
