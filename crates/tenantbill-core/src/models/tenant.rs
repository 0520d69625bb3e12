use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Tenant (billable organization) entity. Owned by a single user; a user may
/// own many tenants. Tenants are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    /// Provider customer id; null until the tenant's first checkout.
    pub stripe_customer_id: Option<String>,
}

/// Partial update for a tenant. `Some` fields replace the stored value.
#[derive(Debug, Clone, Default)]
pub struct TenantChanges {
    pub stripe_customer_id: Option<String>,
}

impl Tenant {
    /// Apply a change-set, replacing any field that is `Some`.
    pub fn apply(&mut self, changes: TenantChanges) {
        if let Some(customer_id) = changes.stripe_customer_id {
            self.stripe_customer_id = Some(customer_id);
        }
    }
}
