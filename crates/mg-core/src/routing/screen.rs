//! Destination screens.

use serde::{Deserialize, Serialize};

/// Screens the onboarding progression engine can route to.
///
/// The navigation container treats these as opaque destination names; what
/// each screen renders is outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Start of the funnel, also the fallback for unknown steps.
    Welcome,
    SignUp,
    ProfileSetup,
    VerifyIdentity,
    WelcomeQuestionnaire,
    WelcomePsychological,
    EmailVerification,
}
