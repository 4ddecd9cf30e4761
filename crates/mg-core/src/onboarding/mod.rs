//! Onboarding progression domain module.
//!
//! Defines the pure state machine that reconciles the authoritative remote
//! onboarding status into navigation commands.

pub mod state_machine;

pub use state_machine::{ProgressionAction, ProgressionEvent, ProgressionMachine, ProgressionState};
