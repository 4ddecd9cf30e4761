//! Port interfaces for the application layer.
//!
//! Ports define the contract between the decision logic (use cases) and the
//! infrastructure that implements it. The core stays independent of any
//! storage, HTTP, or navigation technology; adapters live in `mg-infra`.

pub mod navigator;
pub mod status_client;
pub mod token_store;

pub use navigator::{NavigatorError, NavigatorPort};
pub use status_client::{StatusClientPort, StatusError};
pub use token_store::{StorageError, TokenStorePort};
