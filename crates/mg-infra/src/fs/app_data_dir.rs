use std::path::PathBuf;

use anyhow::{Context, Result};

/// Get the Mingle application data root directory.
///
/// # Platform-specific paths
/// - macOS: ~/Library/Application Support/Mingle
/// - Windows: %APPDATA%\Mingle
/// - Linux: $XDG_DATA_HOME/Mingle or ~/.local/share/Mingle
///
/// The directory is not created here; callers create it when they first
/// write into it.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to get platform-specific data directory")?;
    Ok(base_dir.join("Mingle"))
}

/// Directory holding the persisted session token.
pub fn session_dir() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("session"))
}
