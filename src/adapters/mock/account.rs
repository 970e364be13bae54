//! In-memory account store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::models::AccountSnapshot;
use crate::traits::{AccountStore, AccountStoreError};

/// Account store that keeps the snapshot in memory.
///
/// Clones share the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    snapshot: Arc<Mutex<AccountSnapshot>>,
    load_should_fail: Arc<Mutex<bool>>,
    save_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an initial snapshot.
    pub fn with_snapshot(snapshot: AccountSnapshot) -> Self {
        let store = Self::default();
        store.set_snapshot(snapshot);
        store
    }

    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Current snapshot, read synchronously.
    pub fn snapshot(&self) -> AccountSnapshot {
        self.snapshot.lock().unwrap().clone()
    }

    pub fn set_snapshot(&self, snapshot: AccountSnapshot) {
        *self.snapshot.lock().unwrap() = snapshot;
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn load(&self) -> Result<AccountSnapshot, AccountStoreError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(AccountStoreError::LoadFailed("Mock load failure".to_string()));
        }
        Ok(self.snapshot())
    }

    async fn save(&self, snapshot: &AccountSnapshot) -> Result<(), AccountStoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(AccountStoreError::SaveFailed("Mock save failure".to_string()));
        }
        self.set_snapshot(snapshot.clone());
        Ok(())
    }
}
