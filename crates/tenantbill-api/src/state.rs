//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only what
//! they need via Axum's `FromRef`, and to avoid a single god object with
//! duplicate repositories.

use crate::services::billing::BillingService;
use std::sync::Arc;
use tenantbill_core::models::PlanCatalog;
use tenantbill_core::Config;
use tenantbill_store::{SubscriptionRepository, TenantRepository, UserRepository};
use tenantbill_stripe::StripeClient;

// ----- Sub-state types -----

/// Flat-file repositories for every collection.
#[derive(Clone)]
pub struct StoreState {
    pub users: UserRepository,
    pub tenants: TenantRepository,
    pub subscriptions: SubscriptionRepository,
}

/// Provider client, billing synchronization, and the plan catalog.
#[derive(Clone)]
pub struct BillingState {
    pub stripe: StripeClient,
    pub service: BillingService,
    pub plans: PlanCatalog,
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreState,
    pub billing: BillingState,
    pub config: Config,
    pub is_production: bool,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for StoreState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.store.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for BillingState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.billing.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
