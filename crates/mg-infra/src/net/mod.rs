//! HTTP adapters for the Mingle backend.

pub mod status_client;

pub use status_client::{HttpStatusClient, StatusClientConfig};
