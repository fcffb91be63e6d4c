//! Integration tests for the HTTP surface.
//!
//! Drives the full router (auth, rate limiting, handlers) through
//! `tower::ServiceExt::oneshot` with in-memory adapters behind the ports.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use credits_gateway::signature;
use credits_hex::inbound::{HttpServer, TrustedTokenVerifier};
use credits_hex::{LedgerConfig, LedgerService, WebhookProcessor};
use credits_store::InMemoryWalletStore;
use credits_types::{
    CreateOrderCommand, Currency, GatewayError, GatewayOrder, GatewayPayment, GatewayRefund, Money,
    PaymentGateway, PaymentStatus, RefundCommand,
};

const PAYMENT_SECRET: &str = "key_secret_test";
const WEBHOOK_SECRET: &str = "hook_secret_test";

/// Gateway double: every payment it is seeded with reads back as captured.
#[derive(Default)]
struct StubGateway {
    payments: Mutex<HashMap<String, GatewayPayment>>,
}

impl StubGateway {
    fn with_captured(self, payment_id: &str, minor: i64) -> Self {
        self.payments.lock().unwrap().insert(
            payment_id.to_string(),
            GatewayPayment {
                id: payment_id.to_string(),
                order_id: Some("order_1".into()),
                amount: Money::from_minor(minor, Currency::INR).unwrap(),
                status: PaymentStatus::Captured,
            },
        );
        self
    }
}

#[async_trait::async_trait]
impl PaymentGateway for StubGateway {
    async fn create_order(&self, cmd: CreateOrderCommand) -> Result<GatewayOrder, GatewayError> {
        Ok(GatewayOrder {
            id: "order_stub".into(),
            amount: cmd.amount,
            receipt: Some(cmd.receipt),
        })
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        self.payments
            .lock()
            .unwrap()
            .get(payment_id)
            .cloned()
            .ok_or(GatewayError::Rejected {
                status: 404,
                detail: "payment not found".into(),
            })
    }

    async fn refund(&self, cmd: RefundCommand) -> Result<GatewayRefund, GatewayError> {
        Ok(GatewayRefund {
            id: "rfnd_stub".into(),
            amount: cmd
                .amount
                .unwrap_or_else(|| Money::from_minor(50000, Currency::INR).unwrap()),
            status: "processed".into(),
        })
    }
}

fn app(gateway: StubGateway) -> Router {
    let service = LedgerService::new(
        InMemoryWalletStore::new(),
        gateway,
        LedgerConfig {
            checkout_key_id: "rzp_test_key".into(),
            payment_secret: PAYMENT_SECRET.into(),
        },
    );
    HttpServer::new(
        service,
        WebhookProcessor::new(Some(WEBHOOK_SECRET.into())),
        Arc::new(TrustedTokenVerifier),
    )
    .router()
}

fn post_json(uri: &str, bearer: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_authed(uri: &str, bearer: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {bearer}"))
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn confirmation_sig(order_id: &str, payment_id: &str) -> String {
    signature::sign(
        signature::payment_message(order_id, payment_id).as_bytes(),
        PAYMENT_SECRET,
    )
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app(StubGateway::default());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "OK");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_missing_bearer_is_unauthorized() {
    let app = app(StubGateway::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/payment/balance")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Access token required");
}

#[tokio::test]
async fn test_create_order_returns_checkout_material() {
    let app = app(StubGateway::default());

    let response = app
        .oneshot(post_json(
            "/api/create-order",
            Some("u1"),
            serde_json::json!({"amount": 500, "questionCount": 10}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["orderId"], "order_stub");
    assert_eq!(json["amount"], 50000);
    assert_eq!(json["currency"], "INR");
    assert_eq!(json["key"], "rzp_test_key");
}

#[tokio::test]
async fn test_create_order_validates_amount() {
    let app = app(StubGateway::default());

    let response = app
        .oneshot(post_json(
            "/api/create-order",
            Some("u1"),
            serde_json::json!({"amount": 0, "questionCount": 10}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_payment_credits_and_persists() {
    let app = app(StubGateway::default().with_captured("pay_1", 50000));

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/verify-payment",
            Some("u1"),
            serde_json::json!({
                "razorpay_order_id": "order_1",
                "razorpay_payment_id": "pay_1",
                "razorpay_signature": confirmation_sig("order_1", "pay_1"),
                "questionCount": 10
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["balance"], 10);
    assert_eq!(json["transaction"]["amount"], 500);
    assert_eq!(json["transaction"]["status"], "completed");

    let response = app
        .oneshot(get_authed("/api/payment/balance", "u1"))
        .await
        .unwrap();
    let json = json_body(response).await;
    assert_eq!(json["balance"], 10);
    assert_eq!(json["transactions"][0]["gatewayPaymentId"], "pay_1");
}

#[tokio::test]
async fn test_verify_payment_rejects_tampered_signature() {
    let app = app(StubGateway::default().with_captured("pay_1", 50000));

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/verify-payment",
            Some("u1"),
            serde_json::json!({
                "razorpay_order_id": "order_1",
                "razorpay_payment_id": "pay_1",
                "razorpay_signature": confirmation_sig("order_1", "pay_tampered"),
                "questionCount": 10
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get_authed("/api/payment/balance", "u1"))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["balance"], 0);
}

#[tokio::test]
async fn test_legacy_payment_still_credits() {
    let app = app(StubGateway::default());

    let response = app
        .oneshot(post_json(
            "/api/payment",
            Some("u1"),
            serde_json::json!({"payment": 250, "questionCount": 5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["balance"], 5);
    assert_eq!(json["transaction"]["amount"], 250);
}

#[tokio::test]
async fn test_refund_relays_to_gateway() {
    let app = app(StubGateway::default());

    let response = app
        .oneshot(post_json(
            "/api/refund",
            Some("u1"),
            serde_json::json!({"paymentId": "pay_1", "amount": 100}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["refundId"], "rfnd_stub");
    assert_eq!(json["amount"], 100);
    assert_eq!(json["status"], "processed");
}

#[tokio::test]
async fn test_webhook_accepts_valid_signature() {
    let app = app(StubGateway::default());
    let body = serde_json::json!({
        "event": "payment.captured",
        "payload": {"payment": {"entity": {"id": "pay_1"}}}
    })
    .to_string();
    let sig = signature::sign(body.as_bytes(), WEBHOOK_SECRET);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/webhook/razorpay")
                .header("Content-Type", "application/json")
                .header("x-razorpay-signature", sig)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["success"], true);
}

#[tokio::test]
async fn test_webhook_rejects_wrong_signature() {
    let app = app(StubGateway::default());
    let body = serde_json::json!({"event": "payment.captured"}).to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/webhook/razorpay")
                .header("Content-Type", "application/json")
                .header("x-razorpay-signature", "deadbeef")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_placeholder_endpoints_respond() {
    let app = app(StubGateway::default());

    let response = app
        .oneshot(post_json(
            "/app/api/promocode",
            Some("u1"),
            serde_json::json!({"promocode": "WELCOME"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = app(StubGateway::default());

    let response = app
        .oneshot(get_authed("/api/unknown", "u1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Route not found");
    assert_eq!(json["path"], "/api/unknown");
}
