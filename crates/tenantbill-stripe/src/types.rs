//! Provider wire objects, deserialized from API responses and webhook
//! payloads. Only the fields this service reads are modeled; everything else
//! in the provider objects is ignored on deserialization.

use crate::error::StripeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Convert a provider unix-seconds timestamp to UTC.
pub fn unix_to_datetime(secs: i64) -> Result<DateTime<Utc>, StripeError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StripeError::Malformed(format!("timestamp out of range: {}", secs)))
}

/// Paginated list wrapper the provider uses for every collection response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeList<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripePrice {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeSubscriptionItem {
    pub id: String,
    pub price: StripePrice,
}

/// Provider subscription object. Period bounds arrive as unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeSubscription {
    pub id: String,
    pub status: String,
    pub cancel_at_period_end: bool,
    pub current_period_start: i64,
    pub current_period_end: i64,
    pub items: StripeList<StripeSubscriptionItem>,
}

impl StripeSubscription {
    /// The subscription's first (and for this service, only) line item.
    pub fn first_item(&self) -> Result<&StripeSubscriptionItem, StripeError> {
        self.items
            .data
            .first()
            .ok_or_else(|| StripeError::Malformed(format!("subscription {} has no items", self.id)))
    }

    pub fn period_bounds(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), StripeError> {
        Ok((
            unix_to_datetime(self.current_period_start)?,
            unix_to_datetime(self.current_period_end)?,
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeCustomer {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Provider checkout session object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,
    pub mode: String,
    /// Hosted checkout URL; absent once the session completes.
    #[serde(default)]
    pub url: Option<String>,
    /// Subscription id; populated for completed subscription-mode sessions.
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl StripeCheckoutSession {
    pub fn tenant_id(&self) -> Option<&str> {
        self.metadata.get("tenantId").map(String::as_str)
    }
}

/// Raw webhook event envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}
