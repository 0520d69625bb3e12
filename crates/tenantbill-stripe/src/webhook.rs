//! Webhook signature verification and event classification.

use crate::error::StripeError;
use crate::types::{StripeCheckoutSession, StripeEvent, StripeSubscription};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verify a provider webhook signature.
///
/// Signature header format: `t=<timestamp>,v1=<hex hmac>`. The signed payload
/// is `<timestamp>.<raw body>` keyed with the shared webhook secret.
pub fn verify_signature(
    payload: &[u8],
    signature_header: &str,
    webhook_secret: &str,
) -> Result<(), StripeError> {
    let mut timestamp = None;
    let mut signature = None;
    for part in signature_header.split(',') {
        match part.split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signature = Some(value),
            _ => {}
        }
    }
    let timestamp = timestamp
        .ok_or_else(|| StripeError::SignatureInvalid("missing timestamp".to_string()))?;
    let signature = signature
        .ok_or_else(|| StripeError::SignatureInvalid("missing v1 signature".to_string()))?;

    let payload = std::str::from_utf8(payload)
        .map_err(|_| StripeError::SignatureInvalid("payload is not utf-8".to_string()))?;
    let signed_payload = format!("{}.{}", timestamp, payload);

    let mut mac = HmacSha256::new_from_slice(webhook_secret.as_bytes())
        .map_err(|_| StripeError::SignatureInvalid("invalid secret".to_string()))?;
    mac.update(signed_payload.as_bytes());
    let expected = hex::encode(mac.finalize().into_bytes());

    if expected.as_bytes().ct_eq(signature.as_bytes()).into() {
        Ok(())
    } else {
        Err(StripeError::SignatureInvalid(
            "signature mismatch".to_string(),
        ))
    }
}

/// Parse a raw (verified) webhook body into the event envelope.
pub fn parse_event(payload: &[u8]) -> Result<StripeEvent, StripeError> {
    serde_json::from_slice(payload).map_err(|e| StripeError::Malformed(e.to_string()))
}

/// The lifecycle events this service reacts to, with an explicit no-op arm
/// for everything else.
#[derive(Debug, Clone)]
pub enum BillingEvent {
    CheckoutCompleted(StripeCheckoutSession),
    SubscriptionUpdated(StripeSubscription),
    SubscriptionDeleted(StripeSubscription),
    Ignored,
}

/// Classify an event envelope by type, deserializing the inner object for
/// the handled kinds.
pub fn classify_event(event: &StripeEvent) -> Result<BillingEvent, StripeError> {
    match event.event_type.as_str() {
        "checkout.session.completed" => serde_json::from_value(event.data.object.clone())
            .map(BillingEvent::CheckoutCompleted)
            .map_err(|e| StripeError::Malformed(format!("checkout session: {}", e))),
        "customer.subscription.updated" => serde_json::from_value(event.data.object.clone())
            .map(BillingEvent::SubscriptionUpdated)
            .map_err(|e| StripeError::Malformed(format!("subscription: {}", e))),
        "customer.subscription.deleted" => serde_json::from_value(event.data.object.clone())
            .map(BillingEvent::SubscriptionDeleted)
            .map_err(|e| StripeError::Malformed(format!("subscription: {}", e))),
        _ => Ok(BillingEvent::Ignored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(payload: &[u8], timestamp: &str, secret: &str) -> String {
        let signed_payload = format!(
            "{}.{}",
            timestamp,
            std::str::from_utf8(payload).expect("utf-8 payload")
        );
        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac accepts any key length");
        mac.update(signed_payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_verify_signature_valid() {
        let secret = "whsec_test_secret";
        let payload = b"{\"type\":\"test\"}";
        let timestamp = "1614556800";
        let sig = sign(payload, timestamp, secret);

        let header = format!("t={},v1={}", timestamp, sig);
        assert!(verify_signature(payload, &header, secret).is_ok());
    }

    #[test]
    fn test_verify_signature_rejects_bad_signature() {
        let result = verify_signature(b"payload", "t=123,v1=deadbeef", "secret");
        assert!(matches!(result, Err(StripeError::SignatureInvalid(_))));
    }

    #[test]
    fn test_verify_signature_rejects_missing_parts() {
        assert!(verify_signature(b"payload", "v1=deadbeef", "secret").is_err());
        assert!(verify_signature(b"payload", "t=123", "secret").is_err());
        assert!(verify_signature(b"payload", "", "secret").is_err());
    }

    #[test]
    fn test_verify_signature_rejects_tampered_payload() {
        let secret = "whsec_test_secret";
        let timestamp = "1614556800";
        let sig = sign(b"original", timestamp, secret);
        let header = format!("t={},v1={}", timestamp, sig);
        assert!(verify_signature(b"tampered", &header, secret).is_err());
    }

    #[test]
    fn test_classify_checkout_completed() {
        let event = parse_event(
            serde_json::json!({
                "id": "evt_1",
                "type": "checkout.session.completed",
                "data": { "object": {
                    "id": "cs_1",
                    "mode": "subscription",
                    "subscription": "sub_ext_1",
                    "metadata": { "tenantId": "tenant_1" }
                }}
            })
            .to_string()
            .as_bytes(),
        )
        .expect("parse");

        match classify_event(&event).expect("classify") {
            BillingEvent::CheckoutCompleted(session) => {
                assert_eq!(session.id, "cs_1");
                assert_eq!(session.tenant_id(), Some("tenant_1"));
            }
            other => panic!("expected CheckoutCompleted, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_unknown_event_is_ignored() {
        let event = parse_event(
            serde_json::json!({
                "id": "evt_1",
                "type": "invoice.paid",
                "data": { "object": {} }
            })
            .to_string()
            .as_bytes(),
        )
        .expect("parse");
        assert!(matches!(
            classify_event(&event).expect("classify"),
            BillingEvent::Ignored
        ));
    }

    #[test]
    fn test_classify_subscription_updated_with_bad_object_is_malformed() {
        let event = parse_event(
            serde_json::json!({
                "id": "evt_1",
                "type": "customer.subscription.updated",
                "data": { "object": { "id": "sub_1" } }
            })
            .to_string()
            .as_bytes(),
        )
        .expect("parse");
        assert!(matches!(
            classify_event(&event),
            Err(StripeError::Malformed(_))
        ));
    }
}
