//! Provider REST API client.
//!
//! The provider accepts form-encoded request bodies with bracketed keys for
//! nested fields (`metadata[tenantId]`, `items[0][price]`) and returns JSON.
//! The API base is injectable so tests can point at a local stand-in.

use crate::error::StripeError;
use crate::types::{StripeCheckoutSession, StripeCustomer, StripeList, StripeSubscription};
use serde::de::DeserializeOwned;

#[derive(Clone, Debug)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

/// Inputs for opening a hosted checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutSessionParams {
    pub customer_id: String,
    pub price_id: String,
    pub tenant_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl StripeClient {
    pub fn new(secret_key: String, api_base: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
            api_base,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.api_base, path)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %message, "Provider API call failed");
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, StripeError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T, StripeError> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await?;
        self.handle_response(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn retrieve_subscription(&self, id: &str) -> Result<StripeSubscription, StripeError> {
        self.get(&format!("/subscriptions/{}", id)).await
    }

    /// Flip the cancel-at-period-end flag on a subscription.
    #[tracing::instrument(skip(self))]
    pub async fn set_cancel_at_period_end(
        &self,
        id: &str,
        cancel: bool,
    ) -> Result<StripeSubscription, StripeError> {
        self.post_form(
            &format!("/subscriptions/{}", id),
            &[("cancel_at_period_end", cancel.to_string())],
        )
        .await
    }

    /// Swap a subscription's line item to a new price, prorating the change.
    #[tracing::instrument(skip(self))]
    pub async fn change_subscription_price(
        &self,
        id: &str,
        item_id: &str,
        new_price_id: &str,
    ) -> Result<StripeSubscription, StripeError> {
        self.post_form(
            &format!("/subscriptions/{}", id),
            &[
                ("items[0][id]", item_id.to_string()),
                ("items[0][price]", new_price_id.to_string()),
                ("proration_behavior", "create_prorations".to_string()),
            ],
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn retrieve_customer(&self, id: &str) -> Result<StripeCustomer, StripeError> {
        self.get(&format!("/customers/{}", id)).await
    }

    /// Create a customer carrying the tenant identity in metadata.
    #[tracing::instrument(skip(self))]
    pub async fn create_customer(
        &self,
        name: &str,
        tenant_id: &str,
    ) -> Result<StripeCustomer, StripeError> {
        self.post_form(
            "/customers",
            &[
                ("name", name.to_string()),
                ("metadata[tenantId]", tenant_id.to_string()),
            ],
        )
        .await
    }

    /// Open a hosted checkout session in subscription mode.
    #[tracing::instrument(skip(self, params), fields(tenant_id = %params.tenant_id))]
    pub async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<StripeCheckoutSession, StripeError> {
        self.post_form(
            "/checkout/sessions",
            &[
                ("customer", params.customer_id.clone()),
                ("payment_method_types[0]", "card".to_string()),
                ("line_items[0][price]", params.price_id.clone()),
                ("line_items[0][quantity]", "1".to_string()),
                ("mode", "subscription".to_string()),
                ("success_url", params.success_url.clone()),
                ("cancel_url", params.cancel_url.clone()),
                ("metadata[tenantId]", params.tenant_id.clone()),
            ],
        )
        .await
    }

    /// List a customer's invoices, passed through verbatim.
    #[tracing::instrument(skip(self))]
    pub async fn list_invoices(
        &self,
        customer_id: &str,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>, StripeError> {
        let list: StripeList<serde_json::Value> = self
            .get(&format!(
                "/invoices?customer={}&limit={}",
                customer_id, limit
            ))
            .await?;
        Ok(list.data)
    }
}
