//! Session use cases
//!
//! This module contains the use cases around the persisted session token:
//! the swallowing policy wrapper over the token store, the startup gate
//! that picks the top-level stack, and sign-in/sign-out persistence.

pub mod gate;
pub mod persist;
pub mod sign_out;
pub mod store;

pub use gate::{SessionGate, StackChoice};
pub use persist::PersistSession;
pub use sign_out::SignOut;
pub use store::SessionStore;
