//! Transaction domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::money::{Currency, Money};

/// The kind of a transaction.
///
/// Only purchases are recorded today; refund reversals are a natural
/// extension once automatic reconciliation lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Payment,
}

/// Settlement state of a recorded transaction. Pending or failed attempts
/// are never persisted, so the only value written is `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
}

/// A recorded credit purchase.
///
/// Transactions are immutable once appended - they represent a historical
/// record of what happened. The serde form is the persisted document shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Amount paid, in major currency units (rupees, not paise)
    pub amount: i64,
    pub currency: Currency,
    /// Credits granted by this purchase
    pub question_count: u32,
    /// When the transaction was appended to the wallet
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    /// Gateway-side payment identifier, for audit and replay detection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_payment_id: Option<String>,
    /// Gateway-side order identifier, for audit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_order_id: Option<String>,
}

impl Transaction {
    /// Creates a gateway-verified purchase record.
    pub fn payment(
        amount: Money,
        question_count: u32,
        payment_id: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.major(),
            currency: amount.currency(),
            question_count,
            timestamp: Utc::now(),
            kind: TransactionKind::Payment,
            status: TransactionStatus::Completed,
            gateway_payment_id: Some(payment_id.into()),
            gateway_order_id: Some(order_id.into()),
        }
    }

    /// Creates a purchase record from the unverified legacy path. The
    /// amount is the caller's claim, taken at face value.
    pub fn legacy_payment(amount: i64, question_count: u32, payment_id: Option<String>) -> Self {
        Self {
            amount,
            currency: Currency::INR,
            question_count,
            timestamp: Utc::now(),
            kind: TransactionKind::Payment,
            status: TransactionStatus::Completed,
            gateway_payment_id: payment_id,
            gateway_order_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_records_major_units() {
        let amount = Money::from_minor(50000, Currency::INR).unwrap();
        let tx = Transaction::payment(amount, 10, "pay_1", "order_1");

        assert_eq!(tx.amount, 500);
        assert_eq!(tx.currency, Currency::INR);
        assert_eq!(tx.question_count, 10);
        assert_eq!(tx.status, TransactionStatus::Completed);
        assert_eq!(tx.gateway_payment_id.as_deref(), Some("pay_1"));
        assert_eq!(tx.gateway_order_id.as_deref(), Some("order_1"));
    }

    #[test]
    fn test_legacy_payment_has_no_order() {
        let tx = Transaction::legacy_payment(250, 5, None);

        assert_eq!(tx.amount, 250);
        assert_eq!(tx.kind, TransactionKind::Payment);
        assert!(tx.gateway_payment_id.is_none());
        assert!(tx.gateway_order_id.is_none());
    }

    #[test]
    fn test_wire_shape() {
        let amount = Money::from_major(500, Currency::INR).unwrap();
        let tx = Transaction::payment(amount, 10, "pay_1", "order_1");
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["amount"], 500);
        assert_eq!(json["currency"], "INR");
        assert_eq!(json["questionCount"], 10);
        assert_eq!(json["type"], "payment");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["gatewayPaymentId"], "pay_1");
        assert_eq!(json["gatewayOrderId"], "order_1");
    }
}
