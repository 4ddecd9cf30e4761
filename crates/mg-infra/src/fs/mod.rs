//! File system adapters.

pub mod app_data_dir;
pub mod token_store;

pub use app_data_dir::app_data_dir;
pub use token_store::{FileTokenStore, DEFAULT_SESSION_TOKEN_FILE};
