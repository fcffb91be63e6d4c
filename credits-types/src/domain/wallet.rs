//! Wallet domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::Transaction;
use crate::error::DomainError;

/// Identifier of a wallet owner, as resolved by the identity verifier.
///
/// Opaque to this service; it is the key under which the wallet document
/// is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a UserId, rejecting empty identifiers.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::EmptyUserId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-user record of credit balance and purchase history.
///
/// `balance` is always the sum of the `question_count` deltas of
/// `transactions`; the history is append-only and its insertion order is
/// chronological. Created lazily with `Wallet::default()` on first read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    pub balance: u32,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Wallet {
    /// Applies a purchase: adds its credits to the balance and appends the
    /// record at the end of the history. Returns the new balance.
    pub fn credit(&mut self, tx: Transaction) -> u32 {
        self.balance += tx.question_count;
        self.transactions.push(tx);
        self.balance
    }

    /// Looks up a recorded purchase by gateway payment id. Used to detect
    /// replayed confirmations before crediting twice.
    pub fn find_payment(&self, payment_id: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|tx| tx.gateway_payment_id.as_deref() == Some(payment_id))
    }
}
