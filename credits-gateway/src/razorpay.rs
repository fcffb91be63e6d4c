//! Razorpay REST adapter for the `PaymentGateway` port.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use credits_types::{
    CreateOrderCommand, Currency, GatewayError, GatewayOrder, GatewayPayment, GatewayRefund, Money,
    OrderNotes, PaymentGateway, PaymentStatus, RefundCommand, RefundNotes,
};

/// Gateway API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id (rzp_test_... / rzp_live_...), also handed to the
    /// checkout widget.
    pub key_id: String,
    /// API secret for basic auth; doubles as the payment signature secret.
    pub key_secret: String,
    /// Base URL for the REST API.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            base_url: "https://api.razorpay.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Points the client at a different API host (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Razorpay REST client implementing the `PaymentGateway` port.
pub struct RazorpayClient {
    config: RazorpayConfig,
    http: reqwest::Client,
}

impl RazorpayClient {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let resp = req
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            resp.json::<T>()
                .await
                .map_err(|e| GatewayError::Codec(e.to_string()))
        } else {
            let body = resp.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorWire>(&body)
                .ok()
                .and_then(|e| e.error.description)
                .unwrap_or(body);
            Err(GatewayError::Rejected {
                status: status.as_u16(),
                detail,
            })
        }
    }
}

#[async_trait::async_trait]
impl PaymentGateway for RazorpayClient {
    #[tracing::instrument(skip(self, cmd), fields(receipt = %cmd.receipt))]
    async fn create_order(&self, cmd: CreateOrderCommand) -> Result<GatewayOrder, GatewayError> {
        let body = CreateOrderBody {
            amount: cmd.amount.minor(),
            currency: cmd.amount.currency(),
            receipt: &cmd.receipt,
            notes: &cmd.notes,
        };
        let wire: OrderWire = self
            .send(self.http.post(self.url("/v1/orders")).json(&body))
            .await?;
        wire.try_into()
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        let wire: PaymentWire = self
            .send(self.http.get(self.url(&format!("/v1/payments/{payment_id}"))))
            .await?;
        wire.try_into()
    }

    #[tracing::instrument(skip(self, cmd), fields(payment_id = %cmd.payment_id))]
    async fn refund(&self, cmd: RefundCommand) -> Result<GatewayRefund, GatewayError> {
        let body = RefundBody {
            amount: cmd.amount.map(|m| m.minor()),
            speed: "normal",
            receipt: &cmd.receipt,
            notes: &cmd.notes,
        };
        let wire: RefundWire = self
            .send(
                self.http
                    .post(self.url(&format!("/v1/payments/{}/refund", cmd.payment_id)))
                    .json(&body),
            )
            .await?;
        wire.try_into()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: Currency,
    receipt: &'a str,
    notes: &'a OrderNotes,
}

#[derive(Serialize)]
struct RefundBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<i64>,
    speed: &'static str,
    receipt: &'a str,
    notes: &'a RefundNotes,
}

#[derive(Deserialize)]
struct OrderWire {
    id: String,
    amount: i64,
    currency: Currency,
    receipt: Option<String>,
}

#[derive(Deserialize)]
struct PaymentWire {
    id: String,
    order_id: Option<String>,
    amount: i64,
    currency: Currency,
    status: PaymentStatus,
}

#[derive(Deserialize)]
struct RefundWire {
    id: String,
    amount: i64,
    currency: Currency,
    status: String,
}

#[derive(Deserialize)]
struct ErrorWire {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    description: Option<String>,
}

impl TryFrom<OrderWire> for GatewayOrder {
    type Error = GatewayError;

    fn try_from(wire: OrderWire) -> Result<Self, Self::Error> {
        Ok(GatewayOrder {
            id: wire.id,
            amount: Money::from_minor(wire.amount, wire.currency)
                .map_err(|e| GatewayError::Codec(e.to_string()))?,
            receipt: wire.receipt,
        })
    }
}

impl TryFrom<PaymentWire> for GatewayPayment {
    type Error = GatewayError;

    fn try_from(wire: PaymentWire) -> Result<Self, Self::Error> {
        Ok(GatewayPayment {
            id: wire.id,
            order_id: wire.order_id,
            amount: Money::from_minor(wire.amount, wire.currency)
                .map_err(|e| GatewayError::Codec(e.to_string()))?,
            status: wire.status,
        })
    }
}

impl TryFrom<RefundWire> for GatewayRefund {
    type Error = GatewayError;

    fn try_from(wire: RefundWire) -> Result<Self, Self::Error> {
        Ok(GatewayRefund {
            id: wire.id,
            amount: Money::from_minor(wire.amount, wire.currency)
                .map_err(|e| GatewayError::Codec(e.to_string()))?,
            status: wire.status,
        })
    }
}
