//! File-based account store.
//!
//! Stores the [`AccountSnapshot`] as JSON, by default in
//! `~/.site-insights/account.json`. A missing file loads as an empty snapshot.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::models::AccountSnapshot;
use crate::traits::{AccountStore, AccountStoreError};

const ACCOUNT_DIR: &str = ".site-insights";
const ACCOUNT_FILE: &str = "account.json";

#[derive(Debug, Clone)]
pub struct FileAccountStore {
    path: PathBuf,
}

impl FileAccountStore {
    /// Store under the user's home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        Self::default_path().map(Self::at)
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(ACCOUNT_DIR).join(ACCOUNT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AccountStore for FileAccountStore {
    async fn load(&self) -> Result<AccountSnapshot, AccountStoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AccountSnapshot::default())
            }
            Err(e) => return Err(AccountStoreError::LoadFailed(e.to_string())),
        };

        serde_json::from_slice(&bytes).map_err(|e| AccountStoreError::Serialization(e.to_string()))
    }

    async fn save(&self, snapshot: &AccountSnapshot) -> Result<(), AccountStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AccountStoreError::SaveFailed(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| AccountStoreError::Serialization(e.to_string()))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| AccountStoreError::SaveFailed(e.to_string()))
    }
}
