//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use credits_types::{IdentityVerifier, PaymentGateway, WalletStore};

use super::auth::auth_middleware;
use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::openapi::ApiDoc;
use crate::webhook::WebhookProcessor;
use crate::LedgerService;

/// HTTP Server for the credits wallet API.
pub struct HttpServer<S: WalletStore, G: PaymentGateway> {
    state: Arc<AppState<S, G>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<S: WalletStore, G: PaymentGateway> HttpServer<S, G> {
    /// Creates a new HTTP server with the given service and collaborators.
    pub fn new(
        service: LedgerService<S, G>,
        webhooks: WebhookProcessor,
        identity: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                service,
                webhooks,
                identity,
            }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(
        service: LedgerService<S, G>,
        webhooks: WebhookProcessor,
        identity: Arc<dyn IdentityVerifier>,
        requests_per_minute: u32,
    ) -> Self {
        use std::time::Duration;
        Self {
            state: Arc::new(AppState {
                service,
                webhooks,
                identity,
            }),
            rate_limiter: Arc::new(RateLimiterState::new(
                requests_per_minute,
                Duration::from_secs(60),
            )),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::health))
            .route("/api/create-order", post(handlers::create_order::<S, G>))
            .route("/api/verify-payment", post(handlers::verify_payment::<S, G>))
            .route("/api/payment", post(handlers::legacy_payment::<S, G>))
            .route("/api/payment/balance", get(handlers::get_balance::<S, G>))
            .route("/api/refund", post(handlers::refund::<S, G>))
            .route("/webhook/razorpay", post(handlers::webhook::<S, G>))
            .route("/app/api/promocode", post(handlers::promocode))
            .route("/app/api/refer", post(handlers::refer))
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .fallback(handlers::not_found)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                auth_middleware::<S, G>,
            ))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
