//! Startup routing and onboarding use cases.

pub mod onboarding;
pub mod session;

pub use onboarding::OnboardingFlow;
pub use session::{PersistSession, SessionGate, SessionStore, SignOut, StackChoice};
