//! In-memory adapter for the `WalletStore` port.
//!
//! Backs development runs and tests; nothing survives a restart.

use dashmap::DashMap;

use credits_types::{StoreError, UserId, Wallet, WalletStore};

/// Process-local wallet documents keyed by user id.
#[derive(Default)]
pub struct InMemoryWalletStore {
    documents: DashMap<UserId, Wallet>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn get(&self, user: &UserId) -> Result<Option<Wallet>, StoreError> {
        Ok(self.documents.get(user).map(|doc| doc.value().clone()))
    }

    async fn put(&self, user: &UserId, wallet: &Wallet) -> Result<(), StoreError> {
        self.documents.insert(user.clone(), wallet.clone());
        Ok(())
    }
}
