//! Gateway-owned entities, as this service reads them back.
//!
//! Orders, payments and refunds live entirely inside the payment gateway;
//! these types carry the fields this service verifies or relays. None of
//! them is persisted locally.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::wallet::UserId;

/// Lifecycle state of a gateway payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Created,
    Authorized,
    Captured,
    Refunded,
    Failed,
}

impl PaymentStatus {
    /// Only captured payments may credit a wallet.
    pub fn is_captured(&self) -> bool {
        matches!(self, PaymentStatus::Captured)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Created => "created",
            PaymentStatus::Authorized => "authorized",
            PaymentStatus::Captured => "captured",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// An order as issued by the gateway.
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: Money,
    pub receipt: Option<String>,
}

/// A payment as reported by the gateway.
#[derive(Debug, Clone)]
pub struct GatewayPayment {
    pub id: String,
    pub order_id: Option<String>,
    pub amount: Money,
    pub status: PaymentStatus,
}

/// A refund as issued by the gateway.
#[derive(Debug, Clone)]
pub struct GatewayRefund {
    pub id: String,
    pub amount: Money,
    pub status: String,
}

/// Instruction to open a gateway order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub amount: Money,
    /// Caller reference echoed back by the gateway; at most 40 characters.
    pub receipt: String,
    pub notes: OrderNotes,
}

/// Opaque audit metadata attached to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNotes {
    pub user_id: UserId,
    pub question_count: u32,
}

/// Instruction to refund a gateway payment. A `None` amount requests a
/// full refund of the original payment.
#[derive(Debug, Clone)]
pub struct RefundCommand {
    pub payment_id: String,
    pub amount: Option<Money>,
    pub receipt: String,
    pub notes: RefundNotes,
}

/// Opaque audit metadata attached to a refund.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundNotes {
    pub user_id: UserId,
    pub reason: String,
}
