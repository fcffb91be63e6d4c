//! HMAC-SHA256 signing and verification for gateway payloads.
//!
//! Two canonical messages exist: `order_id|payment_id` for checkout
//! confirmations, and the raw webhook body for event deliveries. Webhook
//! bodies MUST be verified as received, before JSON decoding - any
//! re-serialization can change the bytes and invalidate the signature.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Signs a message with the shared secret, hex-encoded.
pub fn sign(message: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a hex-encoded signature using constant-time comparison.
pub fn verify(message: &[u8], signature: &str, secret: &str) -> bool {
    let expected = sign(message, secret);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

/// Canonical message for a checkout confirmation. Gateway identifiers
/// never contain the pipe character.
pub fn payment_message(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}

/// Verifies the signature the checkout widget hands back after a payment.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    verify(payment_message(order_id, payment_id).as_bytes(), signature, secret)
}

/// Verifies a webhook delivery over the exact raw body bytes.
pub fn verify_webhook_signature(body: &[u8], signature: &str, secret: &str) -> bool {
    verify(body, signature, secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_is_deterministic() {
        let sig_a = sign(b"order_1|pay_1", "secret");
        let sig_b = sign(b"order_1|pay_1", "secret");

        assert_eq!(sig_a, sig_b);
        assert_eq!(sig_a.len(), 64);
    }

    #[test]
    fn test_payment_signature_roundtrip() {
        let secret = "key_secret_123";
        let sig = sign(payment_message("order_1", "pay_1").as_bytes(), secret);

        assert!(verify_payment_signature("order_1", "pay_1", &sig, secret));
        assert!(!verify_payment_signature("order_1", "pay_2", &sig, secret));
        assert!(!verify_payment_signature("order_1", "pay_1", &sig, "other_secret"));
    }

    #[test]
    fn test_single_byte_change_fails() {
        let secret = "key_secret_123";
        let sig = sign(b"order_1|pay_1", secret);
        let mut tampered = sig.clone().into_bytes();
        tampered[0] = if tampered[0] == b'0' { b'1' } else { b'0' };

        assert!(verify(b"order_1|pay_1", &sig, secret));
        assert!(!verify(
            b"order_1|pay_1",
            std::str::from_utf8(&tampered).unwrap(),
            secret
        ));
        assert!(!verify(b"order_2|pay_1", &sig, secret));
    }

    #[test]
    fn test_webhook_body_verification() {
        let body = br#"{"event":"payment.captured","payload":{}}"#;
        let secret = "webhook_secret_123";
        let sig = sign(body, secret);

        assert!(verify_webhook_signature(body, &sig, secret));
        assert!(!verify_webhook_signature(b"tampered", &sig, secret));
        assert!(!verify_webhook_signature(body, &sig, "wrong_secret"));
    }
}
