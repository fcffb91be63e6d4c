//! Error types for the credits wallet service.

use crate::domain::Currency;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: Currency, got: Currency },

    #[error("User id cannot be empty")]
    EmptyUserId,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Wallet store errors (remote document store access failures).
///
/// All variants are retryable from the caller's point of view: the store
/// either never saw the request or can safely serve it again.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store rejected request: {0}")]
    Rejected(String),

    #[error("Malformed wallet document: {0}")]
    Codec(String),
}

/// Payment gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway unavailable: {0}")]
    Unavailable(String),

    #[error("Gateway rejected request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Malformed gateway response: {0}")]
    Codec(String),
}

/// Identity verification errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credential")]
    InvalidCredential,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes: verification failures are 400 and
/// terminal for the request, store/gateway failures are 500 and safe to
/// retry.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Payment verification failed - invalid signature")]
    InvalidSignature,

    #[error("Payment not captured (status: {status})")]
    PaymentNotCaptured { status: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError::Gateway(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Unauthenticated(err.to_string())
    }
}
