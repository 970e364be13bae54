//! Account store trait abstraction.
//!
//! The host owns where accounts and blogs live; this crate reads and writes
//! them only through [`AccountStore`].

use async_trait::async_trait;

use crate::models::AccountSnapshot;

/// Account store errors.
#[derive(Debug, Clone)]
pub enum AccountStoreError {
    /// Failed to load the snapshot
    LoadFailed(String),
    /// Failed to save the snapshot
    SaveFailed(String),
    /// Nothing stored
    NotFound,
    /// Serialization/deserialization error
    Serialization(String),
}

impl std::fmt::Display for AccountStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStoreError::LoadFailed(msg) => write!(f, "Failed to load accounts: {}", msg),
            AccountStoreError::SaveFailed(msg) => write!(f, "Failed to save accounts: {}", msg),
            AccountStoreError::NotFound => write!(f, "No saved accounts"),
            AccountStoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for AccountStoreError {}

/// Storage for the signed-in account and known blogs.
///
/// `load` returns an empty snapshot when nothing has been saved yet, so a
/// fresh install reads as "logged out" rather than as an error.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Load the stored snapshot.
    async fn load(&self) -> Result<AccountSnapshot, AccountStoreError>;

    /// Replace the stored snapshot.
    async fn save(&self, snapshot: &AccountSnapshot) -> Result<(), AccountStoreError>;

    /// Forget every account and blog.
    async fn clear(&self) -> Result<(), AccountStoreError> {
        self.save(&AccountSnapshot::default()).await
    }
}
