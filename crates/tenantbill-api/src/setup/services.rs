//! Construction of repositories, the provider client, and the billing
//! service into the shared application state.

use crate::services::billing::BillingService;
use crate::state::{AppState, BillingState, StoreState};
use anyhow::Result;
use std::sync::Arc;
use tenantbill_core::models::PlanCatalog;
use tenantbill_core::Config;
use tenantbill_store::{FileStore, SubscriptionRepository, TenantRepository, UserRepository};
use tenantbill_stripe::StripeClient;

/// Initialize all services and repositories
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let store = FileStore::new(&config.data_dir);
    store.ensure_data_dir().await?;
    tracing::info!(data_dir = %store.data_dir().display(), "Record store ready");

    let users = UserRepository::new(store.clone());
    let tenants = TenantRepository::new(store.clone());
    let subscriptions = SubscriptionRepository::new(store.clone());

    let stripe = StripeClient::new(
        config.stripe_secret_key.clone(),
        config.stripe_api_base.clone(),
    );
    let billing_service = BillingService::new(
        stripe.clone(),
        tenants.clone(),
        subscriptions.clone(),
        config.frontend_url.clone(),
    );
    let plans = PlanCatalog::default_catalog();

    let is_production = config.is_production();
    Ok(Arc::new(AppState {
        store: StoreState {
            users,
            tenants,
            subscriptions,
        },
        billing: BillingState {
            stripe,
            service: billing_service,
            plans,
        },
        config: config.clone(),
        is_production,
    }))
}
