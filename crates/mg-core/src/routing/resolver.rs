//! Step-to-screen resolution.

use super::screen::Screen;

/// Map an onboarding step to its destination screen.
///
/// Total and pure:
///
/// | step      | screen               |
/// |-----------|----------------------|
/// | 0         | `None` (stay put)    |
/// | 1         | SignUp               |
/// | 2         | ProfileSetup         |
/// | 3         | VerifyIdentity       |
/// | 4         | WelcomeQuestionnaire |
/// | 5         | WelcomePsychological |
/// | 6         | EmailVerification    |
/// | any other | Welcome              |
///
/// Step 0 means the user is mid-flow on whatever screen is already showing,
/// so no forced navigation is wanted. Steps the client does not know about
/// (negatives, or a step the server shipped before this client did) fall
/// back to `Welcome` rather than stranding the user.
pub fn resolve_screen(step: i64) -> Option<Screen> {
    match step {
        0 => None,
        1 => Some(Screen::SignUp),
        2 => Some(Screen::ProfileSetup),
        3 => Some(Screen::VerifyIdentity),
        4 => Some(Screen::WelcomeQuestionnaire),
        5 => Some(Screen::WelcomePsychological),
        6 => Some(Screen::EmailVerification),
        _ => Some(Screen::Welcome),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_screen, Screen};
    use crate::session::StepValue;

    #[test]
    fn resolver_maps_every_known_step() {
        assert_eq!(resolve_screen(0), None);
        assert_eq!(resolve_screen(1), Some(Screen::SignUp));
        assert_eq!(resolve_screen(2), Some(Screen::ProfileSetup));
        assert_eq!(resolve_screen(3), Some(Screen::VerifyIdentity));
        assert_eq!(resolve_screen(4), Some(Screen::WelcomeQuestionnaire));
        assert_eq!(resolve_screen(5), Some(Screen::WelcomePsychological));
        assert_eq!(resolve_screen(6), Some(Screen::EmailVerification));
    }

    #[test]
    fn resolver_falls_back_to_welcome_for_unknown_steps() {
        assert_eq!(resolve_screen(7), Some(Screen::Welcome));
        assert_eq!(resolve_screen(99), Some(Screen::Welcome));
        assert_eq!(resolve_screen(-1), Some(Screen::Welcome));
        assert_eq!(resolve_screen(i64::MIN), Some(Screen::Welcome));
    }

    #[test]
    fn resolver_truncates_fractional_steps_down() {
        assert_eq!(
            resolve_screen(StepValue::new(3.9).screen_step()),
            Some(Screen::VerifyIdentity)
        );
        assert_ne!(StepValue::new(3.9).screen_step(), 4);
    }
}
