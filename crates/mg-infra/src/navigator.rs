//! Navigation bridge between the decision layer and the UI shell.
//!
//! The flow pushes screens through an unbounded channel the shell's router
//! consumes. A readiness latch holds commands back until the router is
//! mounted; commands issued before that point are delivered after, never
//! dropped.

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use mg_core::ports::{NavigatorError, NavigatorPort};
use mg_core::routing::Screen;

pub struct ChannelNavigator {
    ready_tx: watch::Sender<bool>,
    ready_rx: watch::Receiver<bool>,
    commands: mpsc::UnboundedSender<Screen>,
}

impl ChannelNavigator {
    /// Returns the navigator and the stream of screens the shell routes to.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Screen>) {
        let (ready_tx, ready_rx) = watch::channel(false);
        let (commands, command_rx) = mpsc::unbounded_channel();
        (
            Self {
                ready_tx,
                ready_rx,
                commands,
            },
            command_rx,
        )
    }

    /// Flip the readiness latch once the shell's router is mounted.
    ///
    /// The latch stays set; waiters registered before or after this call
    /// both proceed.
    pub fn mark_ready(&self) {
        // send only fails with no receivers left; self holds one.
        let _ = self.ready_tx.send(true);
        info!("navigator marked ready");
    }
}

#[async_trait]
impl NavigatorPort for ChannelNavigator {
    async fn wait_ready(&self) {
        let mut ready = self.ready_rx.clone();
        // Err means the sender is gone, which cannot outlive self.
        let _ = ready.wait_for(|mounted| *mounted).await;
    }

    async fn navigate(&self, screen: Screen) -> Result<(), NavigatorError> {
        debug!(?screen, "forwarding navigation command to the shell");
        self.commands
            .send(screen)
            .map_err(|_| NavigatorError::Closed)
    }
}
