//! Ledger Application Service
//!
//! Orchestrates payment verification and wallet bookkeeping through the
//! store and gateway ports. Contains NO infrastructure logic - pure
//! business orchestration.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use credits_gateway::signature;
use credits_types::{
    AppError, CreateOrderCommand, Currency, GatewayOrder, GatewayRefund, Money, OrderNotes,
    PaymentGateway, RefundCommand, RefundNotes, Transaction, UserId, Wallet, WalletStore,
};

/// Gateway credentials the ledger needs beyond the HTTP client itself.
#[derive(Clone)]
pub struct LedgerConfig {
    /// Public key id handed to checkout clients alongside new orders.
    pub checkout_key_id: String,
    /// Shared secret for checkout confirmation signatures.
    pub payment_secret: String,
}

/// Application service for the wallet ledger.
///
/// Generic over `S: WalletStore` and `G: PaymentGateway` - the adapters
/// are injected at composition time. This enables:
/// - Swapping the remote store without code changes
/// - Testing with in-memory ports
/// - Compile-time checks for port implementation
///
/// All wallet mutations for one user are linearized behind a per-user
/// async mutex held across the read-modify-write cycle, so concurrent
/// confirmations cannot clobber each other's credits.
pub struct LedgerService<S: WalletStore, G: PaymentGateway> {
    store: Arc<S>,
    gateway: Arc<G>,
    config: LedgerConfig,
    write_locks: Arc<DashMap<UserId, Arc<Mutex<()>>>>,
}

impl<S: WalletStore, G: PaymentGateway> LedgerService<S, G> {
    /// Creates a new ledger service over the given adapters.
    pub fn new(store: S, gateway: G, config: LedgerConfig) -> Self {
        Self {
            store: Arc::new(store),
            gateway: Arc::new(gateway),
            config,
            write_locks: Arc::new(DashMap::new()),
        }
    }

    /// Public gateway key id for checkout clients.
    pub fn checkout_key_id(&self) -> &str {
        &self.config.checkout_key_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Orders
    // ─────────────────────────────────────────────────────────────────────────

    /// Opens a gateway order for a credit purchase.
    ///
    /// The wallet is untouched; credits are granted only once the payment
    /// is confirmed. No local state exists for the order, so a gateway
    /// failure leaves nothing to clean up.
    pub async fn create_order(
        &self,
        user: UserId,
        amount: i64,
        question_count: u32,
    ) -> Result<GatewayOrder, AppError> {
        if amount <= 0 {
            return Err(AppError::BadRequest("Amount must be positive".into()));
        }
        if question_count == 0 {
            return Err(AppError::BadRequest("Question count must be positive".into()));
        }

        let cmd = CreateOrderCommand {
            amount: Money::from_major(amount, Currency::INR)?,
            // The gateway caps receipts at 40 characters.
            receipt: format!("ord_{}", Uuid::new_v4().simple()),
            notes: OrderNotes {
                user_id: user,
                question_count,
            },
        };

        self.gateway.create_order(cmd).await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payment confirmation
    // ─────────────────────────────────────────────────────────────────────────

    /// Verifies a checkout confirmation and credits the wallet.
    ///
    /// Verification happens in two steps before any wallet access: the
    /// checkout signature over `order_id|payment_id`, then the payment's
    /// captured status as the gateway reports it. Either failure is
    /// terminal for the request and leaves no state behind; store or
    /// gateway IO failures after verification are retryable - the same
    /// confirmation can be resubmitted and the replay guard keeps the
    /// credit single.
    pub async fn confirm_payment(
        &self,
        user: UserId,
        order_id: String,
        payment_id: String,
        sig: &str,
        question_count: u32,
    ) -> Result<(u32, Transaction), AppError> {
        if question_count == 0 {
            return Err(AppError::BadRequest("Question count must be positive".into()));
        }

        if !signature::verify_payment_signature(
            &order_id,
            &payment_id,
            sig,
            &self.config.payment_secret,
        ) {
            return Err(AppError::InvalidSignature);
        }

        let payment = self.gateway.fetch_payment(&payment_id).await?;
        if !payment.status.is_captured() {
            return Err(AppError::PaymentNotCaptured {
                status: payment.status.as_str().into(),
            });
        }

        let tx = Transaction::payment(payment.amount, question_count, payment_id, order_id);
        self.apply_credit(user, tx).await
    }

    /// Credits the wallet from the legacy endpoint, trusting the
    /// caller-supplied amount.
    ///
    /// No gateway verification happens here. This is the weak-trust path
    /// kept for older clients and slated for removal once they are gone.
    pub async fn record_payment(
        &self,
        user: UserId,
        amount: i64,
        question_count: u32,
        payment_id: Option<String>,
    ) -> Result<(u32, Transaction), AppError> {
        if amount <= 0 {
            return Err(AppError::BadRequest("Payment amount must be positive".into()));
        }
        if question_count == 0 {
            return Err(AppError::BadRequest("Question count must be positive".into()));
        }

        let tx = Transaction::legacy_payment(amount, question_count, payment_id);
        self.apply_credit(user, tx).await
    }

    /// Read-modify-write of one wallet under its user's write lock.
    ///
    /// Runs in a spawned task: a client that disconnects mid-request must
    /// not cancel a write that may already be in flight to the store.
    /// Replayed confirmations (same gateway payment id already recorded)
    /// return the existing state without a second credit.
    async fn apply_credit(
        &self,
        user: UserId,
        tx: Transaction,
    ) -> Result<(u32, Transaction), AppError> {
        let store = Arc::clone(&self.store);
        let locks = Arc::clone(&self.write_locks);

        let write = tokio::spawn(async move {
            let lock = locks
                .entry(user.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value()
                .clone();
            let _guard = lock.lock().await;

            let mut wallet = store.get(&user).await?.unwrap_or_default();

            if let Some(payment_id) = tx.gateway_payment_id.as_deref()
                && let Some(existing) = wallet.find_payment(payment_id)
            {
                tracing::info!(user = %user, payment_id, "replayed confirmation, crediting once");
                return Ok((wallet.balance, existing.clone()));
            }

            let balance = wallet.credit(tx.clone());
            store.put(&user, &wallet).await?;

            tracing::info!(user = %user, balance, "wallet credited");
            Ok((balance, tx))
        });

        write
            .await
            .map_err(|e| AppError::Internal(format!("wallet write aborted: {e}")))?
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Refunds
    // ─────────────────────────────────────────────────────────────────────────

    /// Relays a refund request to the gateway.
    ///
    /// The wallet is deliberately left untouched: refunds are reconciled
    /// manually against the transaction history (see the `refund.created`
    /// webhook handler for the automation extension point). Omitting the
    /// amount requests a full refund of the original payment.
    pub async fn refund(
        &self,
        user: UserId,
        payment_id: String,
        amount: Option<i64>,
        reason: Option<String>,
    ) -> Result<GatewayRefund, AppError> {
        if payment_id.trim().is_empty() {
            return Err(AppError::BadRequest("Payment ID is required for refund".into()));
        }
        if let Some(amount) = amount
            && amount <= 0
        {
            return Err(AppError::BadRequest("Refund amount must be positive".into()));
        }

        let cmd = RefundCommand {
            payment_id,
            amount: amount
                .map(|a| Money::from_major(a, Currency::INR))
                .transpose()?,
            receipt: format!("rfnd_{}", Uuid::new_v4().simple()),
            notes: RefundNotes {
                user_id: user,
                reason: reason.unwrap_or_else(|| "User requested refund".into()),
            },
        };

        self.gateway.refund(cmd).await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the wallet for a user, defaulting to an empty one that has
    /// never been written.
    pub async fn balance(&self, user: &UserId) -> Result<Wallet, AppError> {
        Ok(self.store.get(user).await?.unwrap_or_default())
    }
}
