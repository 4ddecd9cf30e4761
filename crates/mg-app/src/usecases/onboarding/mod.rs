//! Onboarding use cases
//!
//! This module contains the orchestrator that drives the onboarding
//! progression state machine against the token store, the status endpoint,
//! and the navigator.

pub mod flow;

pub use flow::OnboardingFlow;
