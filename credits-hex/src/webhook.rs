//! Inbound gateway event processor.
//!
//! Webhook deliveries are authenticated over the raw body bytes, parsed,
//! and routed by event tag. Handlers are observational today: they log
//! the lifecycle event and leave the wallet alone. Idempotent
//! reconciliation (e.g. reversing credits on `refund.created`) plugs in
//! here when it is wanted.

use serde::Deserialize;

use credits_gateway::signature;

/// A gateway lifecycle event, decoded after verification.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayEvent {
    /// Event tag, e.g. `payment.captured`
    pub event: String,
    /// Event-specific entity envelope, passed through untouched
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Why a delivery was rejected. Rejected deliveries get an error status
/// so the gateway retries them; anything that parsed and routed is
/// acknowledged regardless of what the handler thought of it.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Missing webhook signature header")]
    MissingSignature,

    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error("Malformed webhook body: {0}")]
    Malformed(String),
}

/// Verifies and dispatches inbound gateway events.
pub struct WebhookProcessor {
    secret: Option<String>,
}

impl WebhookProcessor {
    /// Creates a processor. Without a secret, verification is skipped
    /// with a warning - a development fallback, never a production
    /// configuration.
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    /// Runs a delivery through verify -> parse -> dispatch.
    ///
    /// `body` must be the exact bytes as received; verification happens
    /// before JSON decoding.
    pub fn process(
        &self,
        body: &[u8],
        sig: Option<&str>,
    ) -> Result<GatewayEvent, WebhookError> {
        match &self.secret {
            Some(secret) => {
                let sig = sig.ok_or(WebhookError::MissingSignature)?;
                if !signature::verify_webhook_signature(body, sig, secret) {
                    return Err(WebhookError::InvalidSignature);
                }
            }
            None => {
                tracing::warn!("webhook secret not configured, skipping signature verification");
            }
        }

        let event: GatewayEvent =
            serde_json::from_slice(body).map_err(|e| WebhookError::Malformed(e.to_string()))?;

        self.dispatch(&event);
        Ok(event)
    }

    fn dispatch(&self, event: &GatewayEvent) {
        match event.event.as_str() {
            "payment.captured" => {
                tracing::info!(payment = entity_id(event, "payment"), "payment captured");
            }
            "payment.failed" => {
                tracing::info!(payment = entity_id(event, "payment"), "payment failed");
            }
            "refund.created" => {
                // Wallet reversal is manual today; this is where automatic
                // reconciliation would key off the refund's payment id.
                tracing::info!(refund = entity_id(event, "refund"), "refund created");
            }
            "dispute.created" => {
                tracing::warn!(dispute = entity_id(event, "dispute"), "dispute created");
            }
            other => {
                tracing::info!(event = other, "unhandled webhook event");
            }
        }
    }
}

/// Digs the entity id out of a gateway payload envelope
/// (`payload.<kind>.entity.id`).
fn entity_id<'a>(event: &'a GatewayEvent, kind: &str) -> Option<&'a str> {
    event
        .payload
        .get(kind)?
        .get("entity")?
        .get("id")?
        .as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured_body() -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "event": "payment.captured",
            "payload": {"payment": {"entity": {"id": "pay_1", "status": "captured"}}}
        }))
        .unwrap()
    }

    #[test]
    fn test_verified_event_dispatches() {
        let processor = WebhookProcessor::new(Some("hook_secret".into()));
        let body = captured_body();
        let sig = signature::sign(&body, "hook_secret");

        let event = processor.process(&body, Some(&sig)).unwrap();

        assert_eq!(event.event, "payment.captured");
        assert_eq!(entity_id(&event, "payment"), Some("pay_1"));
    }

    #[test]
    fn test_wrong_signature_rejected() {
        let processor = WebhookProcessor::new(Some("hook_secret".into()));
        let body = captured_body();
        let sig = signature::sign(&body, "some_other_secret");

        assert!(matches!(
            processor.process(&body, Some(&sig)),
            Err(WebhookError::InvalidSignature)
        ));
    }

    #[test]
    fn test_missing_signature_rejected_when_secret_configured() {
        let processor = WebhookProcessor::new(Some("hook_secret".into()));

        assert!(matches!(
            processor.process(&captured_body(), None),
            Err(WebhookError::MissingSignature)
        ));
    }

    #[test]
    fn test_unconfigured_secret_skips_verification() {
        let processor = WebhookProcessor::new(None);

        let event = processor.process(&captured_body(), None).unwrap();
        assert_eq!(event.event, "payment.captured");
    }

    #[test]
    fn test_malformed_body_rejected() {
        let processor = WebhookProcessor::new(None);

        assert!(matches!(
            processor.process(b"not json", None),
            Err(WebhookError::Malformed(_))
        ));
    }

    #[test]
    fn test_unknown_event_still_acknowledged() {
        let processor = WebhookProcessor::new(None);
        let body = serde_json::to_vec(&serde_json::json!({"event": "order.paid"})).unwrap();

        let event = processor.process(&body, None).unwrap();
        assert_eq!(event.event, "order.paid");
    }
}
