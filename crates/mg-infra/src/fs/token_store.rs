//! File-based session token store.
//!
//! Desktop stand-in for platform keychain storage: the token lives in a
//! single file under the application data directory. The application layer
//! decides how storage failures degrade; this adapter only reports them.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use mg_core::ports::{StorageError, TokenStorePort};
use mg_core::session::SessionToken;

pub const DEFAULT_SESSION_TOKEN_FILE: &str = ".session_token";

pub struct FileTokenStore {
    token_file_path: PathBuf,
}

impl FileTokenStore {
    /// Create a store with a custom file path
    pub fn new(token_file_path: PathBuf) -> Self {
        Self { token_file_path }
    }

    /// Create a store with base dir and filename
    pub fn with_base_dir(base_dir: PathBuf, filename: impl Into<String>) -> Self {
        Self {
            token_file_path: base_dir.join(filename.into()),
        }
    }

    /// Create a store with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            token_file_path: base_dir.join(DEFAULT_SESSION_TOKEN_FILE),
        }
    }

    async fn ensure_parent_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.token_file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Unavailable(format!("create token dir: {}", e)))?;
        }
        Ok(())
    }
}

#[async_trait]
impl TokenStorePort for FileTokenStore {
    async fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
        self.ensure_parent_dir().await?;

        let mut file = fs::File::create(&self.token_file_path)
            .await
            .map_err(|e| StorageError::Unavailable(format!("create token file: {}", e)))?;

        file.write_all(token.expose().as_bytes())
            .await
            .map_err(|e| StorageError::Unavailable(format!("write token file: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| StorageError::Unavailable(format!("sync token file: {}", e)))?;

        Ok(())
    }

    async fn load(&self) -> Result<Option<SessionToken>, StorageError> {
        let content = match fs::read_to_string(&self.token_file_path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no session token file, treating as signed out");
                return Ok(None);
            }
            Err(err) => {
                return Err(StorageError::Unavailable(format!(
                    "read token file: {}",
                    err
                )))
            }
        };

        match SessionToken::new(content.trim().to_string()) {
            Some(token) => Ok(Some(token)),
            None => Err(StorageError::Corrupt("token file is blank".to_string())),
        }
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.token_file_path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Unavailable(format!(
                "remove token file: {}",
                err
            ))),
        }
    }
}
