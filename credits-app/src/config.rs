//! Configuration loading from environment.

use std::env;

/// Application configuration.
///
/// All secrets are injected from the environment; nothing is hard-coded.
pub struct Config {
    pub port: u16,
    /// Public gateway key id (also handed to checkout clients).
    pub razorpay_key_id: String,
    /// Gateway API secret; doubles as the payment signature secret.
    pub razorpay_key_secret: String,
    /// Webhook signing secret. Unset skips webhook verification - a
    /// development fallback only.
    pub webhook_secret: Option<String>,
    /// Remote wallet store root. Unset falls back to the in-memory store.
    pub firebase_database_url: Option<String>,
    pub firebase_auth_token: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse()?;

        let razorpay_key_id = env::var("RAZORPAY_KEY_ID")
            .map_err(|_| anyhow::anyhow!("RAZORPAY_KEY_ID environment variable is required"))?;
        let razorpay_key_secret = env::var("RAZORPAY_KEY_SECRET")
            .map_err(|_| anyhow::anyhow!("RAZORPAY_KEY_SECRET environment variable is required"))?;

        Ok(Self {
            port,
            razorpay_key_id,
            razorpay_key_secret,
            webhook_secret: env::var("RAZORPAY_WEBHOOK_SECRET").ok(),
            firebase_database_url: env::var("FIREBASE_DATABASE_URL").ok(),
            firebase_auth_token: env::var("FIREBASE_AUTH_TOKEN").ok(),
        })
    }
}
