//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Wire names follow the shapes the web client already speaks: gateway
//! fields keep their snake_case names, everything else is camelCase.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Currency, Transaction};

// ─────────────────────────────────────────────────────────────────────────────
// Order DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to open a gateway order for a credit purchase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Price in major currency units (rupees)
    #[schema(example = 500)]
    pub amount: i64,
    /// Credits to grant once the payment is captured
    #[serde(rename = "questionCount")]
    #[schema(example = 10)]
    pub question_count: u32,
}

/// Response after opening an order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub success: bool,
    /// Gateway order identifier to hand to the checkout widget
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// Order amount in minor currency units, as the gateway holds it
    #[schema(example = 50000)]
    pub amount: i64,
    pub currency: Currency,
    /// Public gateway key id for the checkout widget
    pub key: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Checkout callback payload for the verified confirmation path.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    /// HMAC-SHA256 over `order_id|payment_id`, hex-encoded
    pub razorpay_signature: String,
    #[serde(rename = "questionCount")]
    pub question_count: u32,
}

/// Request body of the legacy, unverified payment path.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LegacyPaymentRequest {
    /// Caller-claimed amount in major currency units
    pub payment: i64,
    #[serde(rename = "questionCount")]
    pub question_count: u32,
    #[serde(
        rename = "razorpayPaymentId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub razorpay_payment_id: Option<String>,
}

/// Response after a wallet credit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub success: bool,
    /// Credit balance after the purchase
    pub balance: u32,
    pub transaction: Transaction,
}

/// Response for a balance read.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BalanceResponse {
    pub success: bool,
    pub balance: u32,
    pub transactions: Vec<Transaction>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Refund DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to relay a refund to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefundRequest {
    #[serde(rename = "paymentId")]
    pub payment_id: String,
    /// Amount in major currency units; omit for a full refund
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Response after the gateway accepts a refund.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefundResponse {
    pub success: bool,
    #[serde(rename = "refundId")]
    pub refund_id: String,
    /// Refunded amount in major currency units
    pub amount: i64,
    /// Gateway-reported refund state, relayed verbatim
    pub status: String,
}
