//! In-process stand-in for the payment provider's API.
//!
//! Serves the handful of endpoints the client calls, with a configurable
//! subscription object and invoice list, and records enough about incoming
//! requests for tests to assert on call counts.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct MockState {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    subscription: Option<serde_json::Value>,
    invoices: Vec<serde_json::Value>,
    customers_created: u32,
    subscription_updates: Vec<String>,
}

pub struct MockStripe {
    pub base_url: String,
    state: MockState,
}

impl MockStripe {
    pub async fn start() -> Self {
        let state = MockState::default();
        let router = Router::new()
            .route(
                "/v1/subscriptions/{id}",
                get(get_subscription).post(update_subscription),
            )
            .route("/v1/customers", post(create_customer))
            .route("/v1/customers/{id}", get(get_customer))
            .route("/v1/checkout/sessions", post(create_checkout_session))
            .route("/v1/invoices", get(list_invoices))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock provider");
        let addr = listener.local_addr().expect("mock provider addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve mock provider");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Set the subscription object returned by retrieve/update calls.
    pub fn set_subscription(&self, value: serde_json::Value) {
        self.state.inner.lock().expect("mock lock").subscription = Some(value);
    }

    pub fn set_invoices(&self, invoices: Vec<serde_json::Value>) {
        self.state.inner.lock().expect("mock lock").invoices = invoices;
    }

    pub fn customers_created(&self) -> u32 {
        self.state.inner.lock().expect("mock lock").customers_created
    }

    /// Raw form bodies of subscription update calls, in order.
    pub fn subscription_updates(&self) -> Vec<String> {
        self.state
            .inner
            .lock()
            .expect("mock lock")
            .subscription_updates
            .clone()
    }
}

fn default_subscription(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "status": "active",
        "cancel_at_period_end": false,
        "current_period_start": 1_700_000_000,
        "current_period_end": 1_702_592_000,
        "items": { "data": [
            { "id": "si_mock", "price": { "id": "price_mock" } }
        ]}
    })
}

fn stored_or_default(state: &MockState, id: &str) -> serde_json::Value {
    state
        .inner
        .lock()
        .expect("mock lock")
        .subscription
        .clone()
        .unwrap_or_else(|| default_subscription(id))
}

async fn get_subscription(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> Json<serde_json::Value> {
    Json(stored_or_default(&state, &id))
}

async fn update_subscription(
    State(state): State<MockState>,
    Path(id): Path<String>,
    body: String,
) -> Json<serde_json::Value> {
    state
        .inner
        .lock()
        .expect("mock lock")
        .subscription_updates
        .push(body);
    Json(stored_or_default(&state, &id))
}

async fn create_customer(State(state): State<MockState>, _body: String) -> Json<serde_json::Value> {
    let mut inner = state.inner.lock().expect("mock lock");
    inner.customers_created += 1;
    Json(serde_json::json!({
        "id": format!("cus_mock{}", inner.customers_created)
    }))
}

async fn get_customer(Path(id): Path<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "id": id }))
}

async fn create_checkout_session(_body: String) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "id": "cs_mock",
        "mode": "subscription",
        "url": "https://checkout.stripe.test/cs_mock",
        "metadata": {}
    }))
}

async fn list_invoices(State(state): State<MockState>) -> Json<serde_json::Value> {
    let invoices = state.inner.lock().expect("mock lock").invoices.clone();
    Json(serde_json::json!({ "data": invoices }))
}
