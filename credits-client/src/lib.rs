//! # Credits Client SDK
//!
//! A typed Rust client for the credits wallet API.

use credits_types::{
    BalanceResponse, CreateOrderRequest, CreateOrderResponse, LegacyPaymentRequest,
    PaymentResponse, RefundRequest, RefundResponse, VerifyPaymentRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Credits wallet API client.
pub struct CreditsClient {
    base_url: String,
    bearer: Option<String>,
    http: Client,
}

impl CreditsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer: None,
            http: Client::new(),
        }
    }

    /// Sets the bearer credential identifying the wallet owner.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Checks if the API is up.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(format!("{}/", self.base_url)).send().await?;
        Ok(resp.status().is_success())
    }

    /// Opens a gateway order for a credit purchase.
    pub async fn create_order(
        &self,
        amount: i64,
        question_count: u32,
    ) -> Result<CreateOrderResponse, ClientError> {
        let req = CreateOrderRequest {
            amount,
            question_count,
        };
        self.post("/api/create-order", &req).await
    }

    /// Submits a checkout confirmation for verification.
    pub async fn verify_payment(
        &self,
        order_id: impl Into<String>,
        payment_id: impl Into<String>,
        signature: impl Into<String>,
        question_count: u32,
    ) -> Result<PaymentResponse, ClientError> {
        let req = VerifyPaymentRequest {
            razorpay_order_id: order_id.into(),
            razorpay_payment_id: payment_id.into(),
            razorpay_signature: signature.into(),
            question_count,
        };
        self.post("/api/verify-payment", &req).await
    }

    /// Records a payment through the legacy, unverified path.
    pub async fn record_payment(
        &self,
        payment: i64,
        question_count: u32,
        payment_id: Option<String>,
    ) -> Result<PaymentResponse, ClientError> {
        let req = LegacyPaymentRequest {
            payment,
            question_count,
            razorpay_payment_id: payment_id,
        };
        self.post("/api/payment", &req).await
    }

    /// Reads the current balance and purchase history.
    pub async fn balance(&self) -> Result<BalanceResponse, ClientError> {
        self.get("/api/payment/balance").await
    }

    /// Requests a refund; omit the amount for a full refund.
    pub async fn refund(
        &self,
        payment_id: impl Into<String>,
        amount: Option<i64>,
        reason: Option<String>,
    ) -> Result<RefundResponse, ClientError> {
        let req = RefundRequest {
            payment_id: payment_id.into(),
            amount,
            reason,
        };
        self.post("/api/refund", &req).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let mut req = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.bearer {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let mut req = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body);
        if let Some(token) = &self.bearer {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
