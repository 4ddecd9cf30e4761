//! Mingle Application Orchestration Layer
//!
//! This crate contains the startup routing use cases and the onboarding
//! flow orchestrator that drive the pure state machines in `mg-core`
//! against the ports implemented by `mg-infra`.

pub mod event;
pub mod usecases;

pub use event::{FlowEvent, Notifier, Subscription};
pub use usecases::onboarding::OnboardingFlow;
pub use usecases::session::{SessionGate, SessionStore, StackChoice};
