//! Session domain module.
//!
//! Defines the opaque session token and the authoritative onboarding status
//! the backend reports for it.

pub mod status;
pub mod token;

pub use status::{OnboardingStatus, StepValue};
pub use token::SessionToken;
