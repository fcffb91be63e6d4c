//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use credits_types::domain::{Currency, Transaction, TransactionKind, TransactionStatus};
use credits_types::dto::{
    BalanceResponse, CreateOrderRequest, CreateOrderResponse, LegacyPaymentRequest,
    PaymentResponse, RefundRequest, RefundResponse, VerifyPaymentRequest,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = inline(serde_json::Value), example = json!({"status": "OK", "message": "Credits Wallet Payment API", "timestamp": "2024-01-01T00:00:00Z"}))
    )
)]
async fn health() {}

/// Open a gateway order for a credit purchase
#[utoipa::path(
    post,
    path = "/api/create-order",
    tag = "payments",
    request_body = CreateOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order opened", body = CreateOrderResponse),
        (status = 400, description = "Invalid amount or question count"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Gateway rejected or unreachable")
    )
)]
async fn create_order() {}

/// Verify a checkout confirmation and credit the wallet
#[utoipa::path(
    post,
    path = "/api/verify-payment",
    tag = "payments",
    request_body = VerifyPaymentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Wallet credited", body = PaymentResponse),
        (status = 400, description = "Invalid signature or payment not captured"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn verify_payment() {}

/// Credit the wallet without gateway verification (legacy clients)
#[utoipa::path(
    post,
    path = "/api/payment",
    tag = "payments",
    request_body = LegacyPaymentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Wallet credited", body = PaymentResponse),
        (status = 400, description = "Invalid amount or question count"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn legacy_payment() {}

/// Read the current balance and purchase history
#[utoipa::path(
    get,
    path = "/api/payment/balance",
    tag = "payments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current wallet state", body = BalanceResponse),
        (status = 401, description = "Unauthorized")
    )
)]
async fn get_balance() {}

/// Relay a refund request to the gateway
#[utoipa::path(
    post,
    path = "/api/refund",
    tag = "payments",
    request_body = RefundRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Refund initiated; the wallet balance is not changed", body = RefundResponse),
        (status = 400, description = "Missing payment id"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn refund() {}

/// Receive a gateway webhook delivery (signature-authenticated raw body)
#[utoipa::path(
    post,
    path = "/webhook/razorpay",
    tag = "webhooks",
    responses(
        (status = 200, description = "Event verified and routed", body = inline(serde_json::Value), example = json!({"success": true})),
        (status = 400, description = "Signature or body rejected")
    )
)]
async fn webhook() {}

/// OpenAPI documentation for the credits wallet API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Credits Wallet Payment API",
        version = "1.0.0",
        description = "Converts verified gateway payments into question credits in a per-user wallet.\n\n## Authentication\n\nAPI endpoints require a bearer credential that resolves to the wallet owner:\n\n```\nAuthorization: Bearer <token>\n```\n\nThe webhook endpoint is authenticated by its signature header instead.",
    ),
    paths(
        health,
        create_order,
        verify_payment,
        legacy_payment,
        get_balance,
        refund,
        webhook,
    ),
    components(
        schemas(
            CreateOrderRequest,
            CreateOrderResponse,
            VerifyPaymentRequest,
            LegacyPaymentRequest,
            PaymentResponse,
            BalanceResponse,
            RefundRequest,
            RefundResponse,
            Transaction,
            TransactionKind,
            TransactionStatus,
            Currency,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Orders, confirmations, balance and refunds"),
        (name = "webhooks", description = "Inbound gateway event deliveries"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for Bearer token authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
