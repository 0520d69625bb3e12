use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Subscription lifecycle status.
///
/// `Active`, `Canceling`, and `Canceled` are states this service assigns;
/// everything the provider reports is carried through verbatim, so statuses
/// like `trialing` or `past_due` survive a round-trip through the store
/// unmodified via the `Other` arm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionStatus {
    Active,
    /// Set locally when a user requests cancellation at period end. The
    /// provider keeps reporting `active` until the period actually ends.
    Canceling,
    Canceled,
    Trialing,
    PastDue,
    Incomplete,
    Unpaid,
    Paused,
    /// Any provider-native status not listed above, passed through as-is.
    Other(String),
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceling => "canceling",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::Unpaid => "unpaid",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Other(s) => s,
        }
    }
}

impl From<String> for SubscriptionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => SubscriptionStatus::Active,
            "canceling" => SubscriptionStatus::Canceling,
            "canceled" => SubscriptionStatus::Canceled,
            "trialing" => SubscriptionStatus::Trialing,
            "past_due" => SubscriptionStatus::PastDue,
            "incomplete" => SubscriptionStatus::Incomplete,
            "unpaid" => SubscriptionStatus::Unpaid,
            "paused" => SubscriptionStatus::Paused,
            _ => SubscriptionStatus::Other(s),
        }
    }
}

impl From<SubscriptionStatus> for String {
    fn from(status: SubscriptionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local subscription record, mirroring the provider's subscription object.
/// Created on checkout completion; mutated by webhooks and user actions;
/// never deleted, only status-transitioned.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub tenant_id: String,
    pub stripe_subscription_id: String,
    pub stripe_subscription_item_id: String,
    pub price_id: String,
    pub status: SubscriptionStatus,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    pub cancel_at_period_end: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<DateTime<Utc>>,
    /// Stamped only by user-initiated plan changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields for a new subscription record; id and creation timestamp are
/// assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub tenant_id: String,
    pub stripe_subscription_id: String,
    pub stripe_subscription_item_id: String,
    pub price_id: String,
    pub status: SubscriptionStatus,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    pub cancel_at_period_end: bool,
}

/// Partial update for a subscription. `Some` fields replace the stored value.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionChanges {
    pub status: Option<SubscriptionStatus>,
    pub price_id: Option<String>,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub cancel_at_period_end: Option<bool>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Apply a change-set, replacing any field that is `Some`.
    pub fn apply(&mut self, changes: SubscriptionChanges) {
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(price_id) = changes.price_id {
            self.price_id = price_id;
        }
        if let Some(start) = changes.current_period_start {
            self.current_period_start = start;
        }
        if let Some(end) = changes.current_period_end {
            self.current_period_end = end;
        }
        if let Some(flag) = changes.cancel_at_period_end {
            self.cancel_at_period_end = flag;
        }
        if let Some(at) = changes.canceled_at {
            self.canceled_at = Some(at);
        }
        if let Some(at) = changes.updated_at {
            self.updated_at = Some(at);
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_known_values_round_trip() {
        for raw in ["active", "canceling", "canceled", "trialing", "past_due"] {
            let status = SubscriptionStatus::from(raw.to_string());
            assert_eq!(status.as_str(), raw);
            let json = serde_json::to_string(&status).expect("serialize");
            assert_eq!(json, format!("\"{}\"", raw));
        }
    }

    #[test]
    fn test_status_unknown_value_passes_through() {
        let status = SubscriptionStatus::from("incomplete_expired".to_string());
        assert_eq!(
            status,
            SubscriptionStatus::Other("incomplete_expired".to_string())
        );
        let json = serde_json::to_string(&status).expect("serialize");
        assert_eq!(json, "\"incomplete_expired\"");
    }

    #[test]
    fn test_apply_overwrites_only_some_fields() {
        let mut sub = Subscription {
            id: "sub_1".to_string(),
            tenant_id: "tenant_1".to_string(),
            stripe_subscription_id: "sub_ext".to_string(),
            stripe_subscription_item_id: "si_1".to_string(),
            price_id: "price_basic".to_string(),
            status: SubscriptionStatus::Active,
            current_period_start: Utc::now(),
            current_period_end: Utc::now(),
            cancel_at_period_end: false,
            created_at: Utc::now(),
            canceled_at: None,
            updated_at: None,
        };
        sub.apply(SubscriptionChanges {
            status: Some(SubscriptionStatus::Canceling),
            cancel_at_period_end: Some(true),
            ..Default::default()
        });
        assert_eq!(sub.status, SubscriptionStatus::Canceling);
        assert!(sub.cancel_at_period_end);
        assert_eq!(sub.price_id, "price_basic");
        assert!(sub.canceled_at.is_none());
    }

    #[test]
    fn test_subscription_serializes_camel_case() {
        let sub = Subscription {
            id: "sub_1".to_string(),
            tenant_id: "tenant_1".to_string(),
            stripe_subscription_id: "sub_ext".to_string(),
            stripe_subscription_item_id: "si_1".to_string(),
            price_id: "price_basic".to_string(),
            status: SubscriptionStatus::Active,
            current_period_start: Utc::now(),
            current_period_end: Utc::now(),
            cancel_at_period_end: false,
            created_at: Utc::now(),
            canceled_at: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&sub).expect("serialize");
        assert!(json.get("stripeSubscriptionId").is_some());
        assert!(json.get("cancelAtPeriodEnd").is_some());
        assert_eq!(json["status"], "active");
        // Absent optionals stay out of the stored document.
        assert!(json.get("canceledAt").is_none());
    }
}
