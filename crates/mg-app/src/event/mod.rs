//! Flow events and their delivery.

pub mod flow_event;
pub mod notifier;

pub use flow_event::FlowEvent;
pub use notifier::{Notifier, Subscription};
