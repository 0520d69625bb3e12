use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Billing interval for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Month,
    Year,
}

/// An offerable subscription plan. Amounts are in minor currency units
/// (cents for usd).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub name: String,
    /// Provider price identifier the checkout session is opened against.
    pub price_id: String,
    pub amount: i64,
    pub currency: String,
    pub interval: BillingInterval,
}

/// In-process, read-only catalog of offerable plans. Constructed at startup
/// and injected; not persisted.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self { plans }
    }

    /// The stock catalog: one monthly and one yearly plan.
    pub fn default_catalog() -> Self {
        Self::new(vec![
            Plan {
                name: "Basic Plan".to_string(),
                price_id: "price_1S52JpJyajMjNrNVo5rHPOvE".to_string(),
                amount: 999,
                currency: "usd".to_string(),
                interval: BillingInterval::Month,
            },
            Plan {
                name: "Pro Plan".to_string(),
                price_id: "price_1S52OZJyajMjNrNV9OJHqFfY".to_string(),
                amount: 9999,
                currency: "usd".to_string(),
                interval: BillingInterval::Year,
            },
        ])
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn find_by_price_id(&self, price_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.price_id == price_id)
    }
}
