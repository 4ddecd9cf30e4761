//! # mg-core
//!
//! Core domain models and routing logic for Mingle.
//!
//! This crate contains pure decision logic without any infrastructure
//! dependencies: the onboarding progression state machine, the step-to-screen
//! resolver, the questionnaire selection/ranking flow, and the ports that
//! adapters implement.

// Public module exports
pub mod onboarding;
pub mod ports;
pub mod questionnaire;
pub mod routing;
pub mod session;
pub mod verification;

// Re-export commonly used types at the crate root
pub use onboarding::{ProgressionAction, ProgressionEvent, ProgressionMachine, ProgressionState};
pub use routing::{resolve_screen, Screen};
pub use session::{OnboardingStatus, SessionToken, StepValue};
pub use verification::VerificationOutcome;
