//! Wallet store port trait.
//!
//! The remote document store is the durable owner of wallet records; this
//! port is the only way the service reads or writes them. Adapters
//! (Firebase Realtime Database, in-memory) implement this trait.

use crate::domain::{UserId, Wallet};
use crate::error::StoreError;

/// Key-value access to per-user wallet documents.
///
/// A wallet that has never been written reads back as `None`; callers
/// materialize the lazy default (`Wallet::default()`) themselves. `put`
/// replaces the whole document, so callers that read-modify-write MUST
/// serialize their access per user - the store itself does not.
#[async_trait::async_trait]
pub trait WalletStore: Send + Sync + 'static {
    /// Reads the wallet document for a user.
    async fn get(&self, user: &UserId) -> Result<Option<Wallet>, StoreError>;

    /// Replaces the wallet document for a user as a single logical write.
    async fn put(&self, user: &UserId, wallet: &Wallet) -> Result<(), StoreError>;
}
