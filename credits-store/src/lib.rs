//! # Credits Store
//!
//! Concrete wallet store implementations (adapters) for the credits wallet
//! service. This crate provides the adapters that implement the
//! `WalletStore` port: the Firebase Realtime Database REST adapter used in
//! production and an in-memory adapter for development and tests.

use async_trait::async_trait;
use credits_types::{StoreError, UserId, Wallet, WalletStore};

pub mod firebase;
pub mod memory;

pub use firebase::{FirebaseConfig, FirebaseWalletStore};
pub use memory::InMemoryWalletStore;

/// Unified store wrapper selected at startup.
///
/// The binary picks the remote store when its endpoint is configured and
/// falls back to the in-memory store otherwise; everything downstream
/// only sees the `WalletStore` port.
pub enum Store {
    Firebase(FirebaseWalletStore),
    Memory(InMemoryWalletStore),
}

impl Store {
    pub fn firebase(config: FirebaseConfig) -> Self {
        Store::Firebase(FirebaseWalletStore::new(config))
    }

    pub fn in_memory() -> Self {
        Store::Memory(InMemoryWalletStore::new())
    }
}

#[async_trait]
impl WalletStore for Store {
    async fn get(&self, user: &UserId) -> Result<Option<Wallet>, StoreError> {
        match self {
            Store::Firebase(inner) => inner.get(user).await,
            Store::Memory(inner) => inner.get(user).await,
        }
    }

    async fn put(&self, user: &UserId, wallet: &Wallet) -> Result<(), StoreError> {
        match self {
            Store::Firebase(inner) => inner.put(user, wallet).await,
            Store::Memory(inner) => inner.put(user, wallet).await,
        }
    }
}
