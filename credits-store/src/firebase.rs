//! Firebase Realtime Database adapter for the `WalletStore` port.
//!
//! One JSON document per user at `wallets/{userId}.json`, accessed over
//! the Realtime Database REST API. The store is the durable owner of
//! record; no local cache is kept, so every read and write is a full
//! round trip.

use std::time::Duration;

use credits_types::{StoreError, UserId, Wallet, WalletStore};

/// Remote store configuration.
#[derive(Clone)]
pub struct FirebaseConfig {
    /// Database root, e.g. `https://<project>-default-rtdb.firebaseio.com`.
    pub database_url: String,
    /// Legacy database secret or service-account token appended as the
    /// `auth` query parameter. Public rules need none.
    pub auth_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl FirebaseConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

/// `WalletStore` adapter over the Realtime Database REST API.
pub struct FirebaseWalletStore {
    config: FirebaseConfig,
    http: reqwest::Client,
}

impl FirebaseWalletStore {
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn document_url(&self, user: &UserId) -> String {
        let mut url = format!("{}/wallets/{}.json", self.config.database_url, user);
        if let Some(token) = &self.config.auth_token {
            url.push_str("?auth=");
            url.push_str(token);
        }
        url
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(StoreError::Rejected(format!("{status}: {body}")))
        }
    }
}

#[async_trait::async_trait]
impl WalletStore for FirebaseWalletStore {
    #[tracing::instrument(skip(self), fields(user = %user))]
    async fn get(&self, user: &UserId) -> Result<Option<Wallet>, StoreError> {
        let resp = self
            .http
            .get(self.document_url(user))
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let body = Self::check(resp)
            .await?
            .text()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        // A path that was never written reads back as the literal `null`.
        serde_json::from_str::<Option<Wallet>>(&body)
            .map_err(|e| StoreError::Codec(e.to_string()))
    }

    #[tracing::instrument(skip(self, wallet), fields(user = %user, balance = wallet.balance))]
    async fn put(&self, user: &UserId, wallet: &Wallet) -> Result<(), StoreError> {
        let resp = self
            .http
            .put(self.document_url(user))
            .timeout(self.config.timeout)
            .json(wallet)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Self::check(resp).await.map(|_| ())
    }
}
