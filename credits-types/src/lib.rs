//! # Credits Types
//!
//! Domain types and port traits for the credits wallet service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Money, Wallet, Transaction, gateway entities)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CreateOrderCommand, Currency, GatewayOrder, GatewayPayment, GatewayRefund, Money, OrderNotes,
    PaymentStatus, RefundCommand, RefundNotes, Transaction, TransactionKind, TransactionStatus,
    UserId, Wallet,
};
pub use dto::*;
pub use error::{AppError, AuthError, DomainError, GatewayError, StoreError};
pub use ports::{IdentityVerifier, PaymentGateway, WalletStore};
