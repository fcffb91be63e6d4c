//! Payment gateway port trait.

use crate::domain::{CreateOrderCommand, GatewayOrder, GatewayPayment, GatewayRefund, RefundCommand};
use crate::error::GatewayError;

/// Thin contract over the external payment gateway.
///
/// The gateway owns order and settlement semantics; this service only
/// opens orders, reads payments back for verification, and relays refund
/// requests.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Opens an order the checkout widget can collect against.
    async fn create_order(&self, cmd: CreateOrderCommand) -> Result<GatewayOrder, GatewayError>;

    /// Fetches a payment by gateway payment id.
    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError>;

    /// Issues a refund against a captured payment.
    async fn refund(&self, cmd: RefundCommand) -> Result<GatewayRefund, GatewayError>;
}
