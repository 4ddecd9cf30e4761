//! Remote session status model.

use serde::{Deserialize, Serialize};

/// Onboarding step counter reported by the backend.
///
/// The value may carry a fractional sub-step component (`3.0` vs `3.5`);
/// only the integer part selects a destination screen. `screen_step` floors
/// rather than rounds, so `3.9` is still step 3 and `-0.5` is step -1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepValue(f64);

impl StepValue {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw fractional value.
    pub fn get(&self) -> f64 {
        self.0
    }

    /// Integer step used for screen resolution.
    pub fn screen_step(&self) -> i64 {
        self.0.floor() as i64
    }
}

impl From<f64> for StepValue {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// Authoritative onboarding/session state, owned by the backend.
///
/// The client only ever reads this; it is refreshed after each completed
/// step. `onboarding_completed == true` dominates `current_step`: a
/// completed user never re-enters the onboarding stack regardless of the
/// step value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingStatus {
    pub authenticated: bool,
    pub onboarding_completed: bool,
    pub current_step: StepValue,
}

impl OnboardingStatus {
    /// Integer step used for screen resolution.
    pub fn screen_step(&self) -> i64 {
        self.current_step.screen_step()
    }
}
