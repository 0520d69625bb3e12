//! Test helpers: build the app state and router against a temp data
//! directory and an in-process mock provider.

#![allow(dead_code)] // Not every test binary uses every helper

pub mod stripe_mock;

use axum_test::TestServer;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use tenantbill_api::setup;
use tenantbill_api::state::AppState;
use tenantbill_core::models::{
    NewSubscription, Subscription, SubscriptionStatus, Tenant, User,
};
use tenantbill_core::Config;

pub const TEST_WEBHOOK_SECRET: &str = "whsec_test_secret";

/// Test application: server, state, mock provider, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub stripe: stripe_mock::MockStripe,
    pub _data_dir: tempfile::TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Path of a collection file in the test data dir.
    pub fn collection_path(&self, name: &str) -> std::path::PathBuf {
        self._data_dir.path().join(format!("{}.json", name))
    }

    pub async fn seed_user(&self, email: &str, password: &str, name: &str) -> User {
        self.state
            .store
            .users
            .create(email.to_string(), password.to_string(), name.to_string())
            .await
            .expect("seed user")
    }

    pub async fn seed_tenant(&self, user_id: &str, name: &str) -> Tenant {
        self.state
            .store
            .tenants
            .create(name.to_string(), user_id.to_string())
            .await
            .expect("seed tenant")
    }

    pub async fn seed_subscription(
        &self,
        tenant_id: &str,
        external_id: &str,
        status: SubscriptionStatus,
    ) -> Subscription {
        self.state
            .store
            .subscriptions
            .create(NewSubscription {
                tenant_id: tenant_id.to_string(),
                stripe_subscription_id: external_id.to_string(),
                stripe_subscription_item_id: "si_seeded".to_string(),
                price_id: "price_basic".to_string(),
                status,
                current_period_start: Utc::now(),
                current_period_end: Utc::now(),
                cancel_at_period_end: false,
            })
            .await
            .expect("seed subscription")
    }
}

/// Setup test app with an isolated data directory and mock provider.
pub async fn setup_test_app() -> TestApp {
    let stripe = stripe_mock::MockStripe::start().await;
    let data_dir = tempfile::tempdir().expect("tempdir");

    let config = Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        data_dir: data_dir.path().to_path_buf(),
        stripe_secret_key: "sk_test_123".to_string(),
        stripe_webhook_secret: TEST_WEBHOOK_SECRET.to_string(),
        stripe_api_base: stripe.base_url.clone(),
        frontend_url: "http://localhost:5173".to_string(),
    };

    let state = setup::services::initialize_services(&config)
        .await
        .expect("initialize services");
    let router = setup::routes::setup_routes(&config, state.clone()).expect("setup routes");
    let server = TestServer::new(router).expect("test server");

    TestApp {
        server,
        state,
        stripe,
        _data_dir: data_dir,
    }
}

/// Compute a valid `stripe-signature` header for a webhook payload.
pub fn sign_webhook(payload: &[u8]) -> String {
    let timestamp = "1700000000";
    let signed_payload = format!(
        "{}.{}",
        timestamp,
        std::str::from_utf8(payload).expect("utf-8 payload")
    );
    let mut mac = Hmac::<Sha256>::new_from_slice(TEST_WEBHOOK_SECRET.as_bytes())
        .expect("hmac accepts any key length");
    mac.update(signed_payload.as_bytes());
    format!(
        "t={},v1={}",
        timestamp,
        hex::encode(mac.finalize().into_bytes())
    )
}

/// Serialize an event payload and post it to the webhook endpoint with a
/// valid signature.
pub async fn post_webhook(app: &TestApp, event: serde_json::Value) -> axum_test::TestResponse {
    let payload = event.to_string();
    let signature = sign_webhook(payload.as_bytes());
    app.client()
        .post("/api/webhooks/stripe")
        .add_header("stripe-signature", signature)
        .bytes(payload.into_bytes().into())
        .await
}
