//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use axum::extract::Extension;
use chrono::Utc;

use credits_types::{
    AppError, BalanceResponse, CreateOrderRequest, CreateOrderResponse, IdentityVerifier,
    LegacyPaymentRequest, PaymentGateway, PaymentResponse, RefundRequest, RefundResponse, UserId,
    VerifyPaymentRequest, WalletStore,
};

use crate::LedgerService;
use crate::webhook::WebhookProcessor;

/// Application state shared across handlers.
pub struct AppState<S: WalletStore, G: PaymentGateway> {
    pub service: LedgerService<S, G>,
    pub webhooks: WebhookProcessor,
    pub identity: Arc<dyn IdentityVerifier>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::InvalidSignature => (
                StatusCode::BAD_REQUEST,
                "Payment verification failed - invalid signature".to_string(),
                None,
            ),
            AppError::PaymentNotCaptured { status } => (
                StatusCode::BAD_REQUEST,
                "Payment not captured".to_string(),
                Some(status),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Gateway(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Payment gateway request failed".to_string(),
                Some(msg),
            ),
            AppError::Store(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Wallet store request failed".to_string(),
                Some(msg),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(msg),
            ),
        };

        let mut body = serde_json::json!({ "error": error });
        if let Some(details) = details {
            body["details"] = serde_json::Value::String(details);
        }

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "message": "Credits Wallet Payment API",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Open a gateway order for a credit purchase.
#[tracing::instrument(skip(state, req), fields(user = %user, amount = req.amount))]
pub async fn create_order<S: WalletStore, G: PaymentGateway>(
    State(state): State<Arc<AppState<S, G>>>,
    Extension(user): Extension<UserId>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .service
        .create_order(user, req.amount, req.question_count)
        .await?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order_id: order.id,
        amount: order.amount.minor(),
        currency: order.amount.currency(),
        key: state.service.checkout_key_id().to_string(),
    }))
}

/// Verify a checkout confirmation and credit the wallet.
#[tracing::instrument(
    skip(state, req),
    fields(user = %user, order_id = %req.razorpay_order_id, payment_id = %req.razorpay_payment_id)
)]
pub async fn verify_payment<S: WalletStore, G: PaymentGateway>(
    State(state): State<Arc<AppState<S, G>>>,
    Extension(user): Extension<UserId>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (balance, transaction) = state
        .service
        .confirm_payment(
            user,
            req.razorpay_order_id,
            req.razorpay_payment_id,
            &req.razorpay_signature,
            req.question_count,
        )
        .await?;

    Ok(Json(PaymentResponse {
        success: true,
        balance,
        transaction,
    }))
}

/// Credit the wallet from the legacy, unverified payment path.
#[tracing::instrument(skip(state, req), fields(user = %user, payment = req.payment))]
pub async fn legacy_payment<S: WalletStore, G: PaymentGateway>(
    State(state): State<Arc<AppState<S, G>>>,
    Extension(user): Extension<UserId>,
    Json(req): Json<LegacyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (balance, transaction) = state
        .service
        .record_payment(user, req.payment, req.question_count, req.razorpay_payment_id)
        .await?;

    Ok(Json(PaymentResponse {
        success: true,
        balance,
        transaction,
    }))
}

/// Read the current balance and purchase history.
#[tracing::instrument(skip(state), fields(user = %user))]
pub async fn get_balance<S: WalletStore, G: PaymentGateway>(
    State(state): State<Arc<AppState<S, G>>>,
    Extension(user): Extension<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    let wallet = state.service.balance(&user).await?;

    Ok(Json(BalanceResponse {
        success: true,
        balance: wallet.balance,
        transactions: wallet.transactions,
    }))
}

/// Relay a refund request to the gateway.
#[tracing::instrument(skip(state, req), fields(user = %user, payment_id = %req.payment_id))]
pub async fn refund<S: WalletStore, G: PaymentGateway>(
    State(state): State<Arc<AppState<S, G>>>,
    Extension(user): Extension<UserId>,
    Json(req): Json<RefundRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let refund = state
        .service
        .refund(user, req.payment_id, req.amount, req.reason)
        .await?;

    Ok(Json(RefundResponse {
        success: true,
        refund_id: refund.id,
        amount: refund.amount.major(),
        status: refund.status,
    }))
}

/// Receive a gateway webhook delivery.
///
/// Takes the raw body: the signature covers the exact bytes as sent, so
/// this handler must not go through a JSON extractor first.
#[tracing::instrument(skip_all)]
pub async fn webhook<S: WalletStore, G: PaymentGateway>(
    State(state): State<Arc<AppState<S, G>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let sig = headers
        .get("x-razorpay-signature")
        .and_then(|v| v.to_str().ok());

    match state.webhooks.process(&body, sig) {
        Ok(event) => {
            tracing::info!(event = %event.event, "webhook processed");
            Json(serde_json::json!({ "success": true })).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "webhook rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

/// Promocode redemption placeholder.
pub async fn promocode() -> impl IntoResponse {
    Json(serde_json::json!({
        "success": false,
        "message": "Promocode feature coming soon"
    }))
}

/// Referral placeholder.
pub async fn refer() -> impl IntoResponse {
    Json(serde_json::json!({
        "success": false,
        "message": "Referral feature coming soon"
    }))
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Route not found",
            "path": uri.path(),
        })),
    )
        .into_response()
}
