//! Domain models for the credits wallet service.

pub mod gateway;
pub mod money;
pub mod transaction;
pub mod wallet;

pub use gateway::{
    CreateOrderCommand, GatewayOrder, GatewayPayment, GatewayRefund, OrderNotes, PaymentStatus,
    RefundCommand, RefundNotes,
};
pub use money::{Currency, Money};
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
pub use wallet::{UserId, Wallet};
