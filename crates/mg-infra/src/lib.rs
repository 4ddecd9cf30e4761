//! # mg-infra
//!
//! Infrastructure adapters for the Mingle client: file-backed token
//! storage, the HTTP onboarding status client, the navigation bridge to
//! the UI shell, and configuration loading.

pub mod config;
pub mod fs;
pub mod navigator;
pub mod net;

pub use config::ClientConfig;
pub use fs::{app_data_dir, FileTokenStore};
pub use navigator::ChannelNavigator;
pub use net::{HttpStatusClient, StatusClientConfig};
