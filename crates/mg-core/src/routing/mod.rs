//! Routing domain module.
//!
//! Defines the named destination screens of the onboarding funnel and the
//! pure step-to-screen resolver.

pub mod resolver;
pub mod screen;

pub use resolver::resolve_screen;
pub use screen::Screen;
