//! # Credits Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the wallet store and gateway adapters
//! - Create the ledger service
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use credits_gateway::{RazorpayClient, RazorpayConfig};
use credits_hex::inbound::{HttpServer, TrustedTokenVerifier};
use credits_hex::{LedgerConfig, LedgerService, WebhookProcessor};
use credits_store::{FirebaseConfig, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,credits_app=debug,credits_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting credits wallet server on port {}", config.port);

    // Pick the wallet store: remote when configured, in-memory otherwise
    let store = match &config.firebase_database_url {
        Some(url) => {
            tracing::info!("Using Firebase wallet store at {}", url);
            let mut firebase = FirebaseConfig::new(url.clone());
            if let Some(token) = &config.firebase_auth_token {
                firebase = firebase.with_auth_token(token.clone());
            }
            Store::firebase(firebase)
        }
        None => {
            tracing::warn!("FIREBASE_DATABASE_URL not set, wallets will not survive a restart");
            Store::in_memory()
        }
    };

    // Gateway client, constructed once and injected
    let gateway = RazorpayClient::new(RazorpayConfig::new(
        config.razorpay_key_id.clone(),
        config.razorpay_key_secret.clone(),
    ));

    if config.webhook_secret.is_none() {
        tracing::warn!("RAZORPAY_WEBHOOK_SECRET not set, webhook signatures will not be verified");
    }

    // Create the ledger service
    let service = LedgerService::new(
        store,
        gateway,
        LedgerConfig {
            checkout_key_id: config.razorpay_key_id.clone(),
            payment_secret: config.razorpay_key_secret.clone(),
        },
    );

    // Create and run the HTTP server
    let server = HttpServer::new(
        service,
        WebhookProcessor::new(config.webhook_secret),
        Arc::new(TrustedTokenVerifier),
    );
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
