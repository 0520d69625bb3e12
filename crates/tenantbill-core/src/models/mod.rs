//! Domain models shared across the tenantbill crates.

mod plan;
mod subscription;
mod tenant;
mod user;

pub use plan::{BillingInterval, Plan, PlanCatalog};
pub use subscription::{
    NewSubscription, Subscription, SubscriptionChanges, SubscriptionStatus,
};
pub use tenant::{Tenant, TenantChanges};
pub use user::{User, UserSummary};
