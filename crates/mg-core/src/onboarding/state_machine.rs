//! Onboarding progression state machine.
//!
//! Defines a pure state transition function for the onboarding progression
//! engine: given the authoritative remote status, decide whether to
//! force-navigate and to where.

use serde::{Deserialize, Serialize};

use crate::routing::{resolve_screen, Screen};
use crate::session::OnboardingStatus;

/// Progression engine state.
///
/// `routed` is the last screen this engine navigated to. It survives
/// reconcile cycles so that an unchanged remote status never re-issues the
/// same navigation command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionState {
    /// Waiting for an authoritative status read.
    Loading { routed: Option<Screen> },
    /// A navigation command for `target` has been issued.
    Navigating { target: Screen },
    /// At rest; no fetch or navigation in flight.
    Idle { routed: Option<Screen> },
    /// The backend rejected the session. Terminal: the session gate owns
    /// the re-route back to the unauthenticated stack.
    Blocked,
}

/// Events that drive the progression engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgressionEvent {
    /// Re-check the remote status and route accordingly. Fired on mount and
    /// whenever the caller learns the remote status may have changed.
    ReconcileRequested,
    /// Authoritative status arrived.
    StatusLoaded(OnboardingStatus),
    /// The backend rejected the session token.
    StatusRejected,
    /// The status endpoint was unreachable after retries.
    StatusUnavailable,
    /// The navigator finished executing the issued command.
    NavigationDone,
    /// The user finished the current onboarding screen.
    StepCompleted,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionAction {
    /// Read the stored token and fetch the remote status.
    FetchStatus,
    /// Navigate to `Screen` once the navigator is ready.
    Navigate(Screen),
    /// Drop the persisted session token.
    ClearSession,
}

/// Pure progression state machine. Side effects live in the orchestrator.
pub struct ProgressionMachine;

impl ProgressionMachine {
    pub fn transition(
        state: ProgressionState,
        event: ProgressionEvent,
    ) -> (ProgressionState, Vec<ProgressionAction>) {
        match (state, event) {
            (ProgressionState::Blocked, _event) => (ProgressionState::Blocked, Vec::new()),
            // Transport failure keeps the user where they are; the session
            // survives until the backend itself rejects it.
            (state, ProgressionEvent::StatusUnavailable) => (state, Vec::new()),
            (_state, ProgressionEvent::StatusRejected) => (
                ProgressionState::Blocked,
                vec![ProgressionAction::ClearSession],
            ),
            (ProgressionState::Loading { routed }, ProgressionEvent::ReconcileRequested) => (
                ProgressionState::Loading { routed },
                vec![ProgressionAction::FetchStatus],
            ),
            (ProgressionState::Idle { routed }, ProgressionEvent::ReconcileRequested) => (
                ProgressionState::Loading { routed },
                vec![ProgressionAction::FetchStatus],
            ),
            (ProgressionState::Idle { routed }, ProgressionEvent::StepCompleted) => (
                ProgressionState::Loading { routed },
                vec![ProgressionAction::FetchStatus],
            ),
            (ProgressionState::Loading { .. }, ProgressionEvent::StatusLoaded(status))
                if status.onboarding_completed =>
            {
                // Completed users belong to the Main stack; this engine
                // goes passive.
                (ProgressionState::Idle { routed: None }, Vec::new())
            }
            (ProgressionState::Loading { routed }, ProgressionEvent::StatusLoaded(status)) => {
                match resolve_screen(status.screen_step()) {
                    // Step 0: trust whatever screen is currently showing.
                    None => (ProgressionState::Idle { routed }, Vec::new()),
                    // Already there; reconciling again must be a no-op.
                    Some(screen) if routed == Some(screen) => {
                        (ProgressionState::Idle { routed }, Vec::new())
                    }
                    Some(screen) => (
                        ProgressionState::Navigating { target: screen },
                        vec![ProgressionAction::Navigate(screen)],
                    ),
                }
            }
            (ProgressionState::Navigating { target }, ProgressionEvent::NavigationDone) => (
                ProgressionState::Idle {
                    routed: Some(target),
                },
                Vec::new(),
            ),
            (state, _event) => (state, Vec::new()),
        }
    }
}
