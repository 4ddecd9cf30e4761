use serde::Serialize;

use mg_core::onboarding::ProgressionState;
use mg_core::routing::Screen;

/// What the shell observes from the flow. Serializable so a UI bridge can
/// forward events across a process or language boundary as-is.
#[derive(Debug, Clone, Serialize)]
pub enum FlowEvent {
    /// The progression engine moved to a new state.
    StateChanged(ProgressionState),
    /// A navigation command was handed to the navigator.
    NavigationIssued(Screen),
    /// The stored session token was removed.
    SessionCleared,
}
