//! Billing synchronization between the local store and the payment provider.
//!
//! The provider is the source of truth for billing state. Inbound webhook
//! events are applied to the local subscription records; user-initiated
//! actions mutate the provider first and mirror the result locally second.
//! If the provider call fails nothing is written locally; if the local write
//! fails after a successful provider call the two stores diverge until the
//! next webhook reconciles them. Nothing is retried.

use chrono::Utc;
use tenantbill_core::models::{
    NewSubscription, Subscription, SubscriptionChanges, SubscriptionStatus, Tenant, TenantChanges,
};
use tenantbill_core::AppError;
use tenantbill_store::{SubscriptionRepository, TenantRepository};
use tenantbill_stripe::{
    BillingEvent, CheckoutSessionParams, StripeCheckoutSession, StripeClient, StripeError,
    StripeSubscription,
};

/// Map provider client errors into the app error taxonomy.
fn stripe_err(err: StripeError) -> AppError {
    match err {
        StripeError::SignatureInvalid(msg) => AppError::InvalidSignature(msg),
        other => AppError::Stripe(other.to_string()),
    }
}

#[derive(Clone)]
pub struct BillingService {
    stripe: StripeClient,
    tenants: TenantRepository,
    subscriptions: SubscriptionRepository,
    frontend_url: String,
}

impl BillingService {
    pub fn new(
        stripe: StripeClient,
        tenants: TenantRepository,
        subscriptions: SubscriptionRepository,
        frontend_url: String,
    ) -> Self {
        Self {
            stripe,
            tenants,
            subscriptions,
            frontend_url,
        }
    }

    // ----- Webhook ingestion -----

    /// Apply a classified provider event to the local store.
    #[tracing::instrument(skip(self, event))]
    pub async fn apply_event(&self, event: BillingEvent) -> Result<(), AppError> {
        match event {
            BillingEvent::CheckoutCompleted(session) => {
                self.handle_checkout_completed(session).await
            }
            BillingEvent::SubscriptionUpdated(subscription) => {
                self.handle_subscription_updated(subscription).await
            }
            BillingEvent::SubscriptionDeleted(subscription) => {
                self.handle_subscription_deleted(subscription).await
            }
            BillingEvent::Ignored => Ok(()),
        }
    }

    async fn handle_checkout_completed(
        &self,
        session: StripeCheckoutSession,
    ) -> Result<(), AppError> {
        if session.mode != "subscription" {
            tracing::debug!(session_id = %session.id, mode = %session.mode, "Ignoring non-subscription checkout session");
            return Ok(());
        }
        let Some(tenant_id) = session.tenant_id().map(str::to_string) else {
            tracing::warn!(session_id = %session.id, "Checkout session completed without tenant metadata, ignoring");
            return Ok(());
        };
        let subscription_id = session.subscription.as_deref().ok_or_else(|| {
            AppError::Stripe(format!(
                "completed checkout session {} has no subscription",
                session.id
            ))
        })?;

        // The session object carries only the subscription id; fetch the full
        // detail before creating the local record.
        let detail = self
            .stripe
            .retrieve_subscription(subscription_id)
            .await
            .map_err(stripe_err)?;
        let item = detail.first_item().map_err(stripe_err)?;
        let (period_start, period_end) = detail.period_bounds().map_err(stripe_err)?;

        let created = self
            .subscriptions
            .create(NewSubscription {
                tenant_id,
                stripe_subscription_id: detail.id.clone(),
                stripe_subscription_item_id: item.id.clone(),
                price_id: item.price.id.clone(),
                status: SubscriptionStatus::from(detail.status.clone()),
                current_period_start: period_start,
                current_period_end: period_end,
                cancel_at_period_end: detail.cancel_at_period_end,
            })
            .await?;
        tracing::info!(
            subscription_id = %created.id,
            stripe_subscription_id = %created.stripe_subscription_id,
            tenant_id = %created.tenant_id,
            "Subscription created from completed checkout"
        );
        Ok(())
    }

    async fn handle_subscription_updated(
        &self,
        subscription: StripeSubscription,
    ) -> Result<(), AppError> {
        let Some(local) = self
            .subscriptions
            .find_by_stripe_subscription_id(&subscription.id)
            .await
        else {
            // No local record to reconcile; acknowledged and dropped. Local
            // and provider state can drift here if the record never existed.
            tracing::debug!(stripe_subscription_id = %subscription.id, "No local subscription for update event, ignoring");
            return Ok(());
        };
        let (period_start, period_end) = subscription.period_bounds().map_err(stripe_err)?;
        self.subscriptions
            .update(
                &local.id,
                SubscriptionChanges {
                    status: Some(SubscriptionStatus::from(subscription.status.clone())),
                    current_period_start: Some(period_start),
                    current_period_end: Some(period_end),
                    cancel_at_period_end: Some(subscription.cancel_at_period_end),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    async fn handle_subscription_deleted(
        &self,
        subscription: StripeSubscription,
    ) -> Result<(), AppError> {
        let Some(local) = self
            .subscriptions
            .find_by_stripe_subscription_id(&subscription.id)
            .await
        else {
            tracing::debug!(stripe_subscription_id = %subscription.id, "No local subscription for delete event, ignoring");
            return Ok(());
        };
        // Stamp the cancellation time once; re-delivered events keep the
        // original timestamp so the transition is idempotent.
        let canceled_at = if local.canceled_at.is_none() {
            Some(Utc::now())
        } else {
            None
        };
        self.subscriptions
            .update(
                &local.id,
                SubscriptionChanges {
                    status: Some(SubscriptionStatus::Canceled),
                    canceled_at,
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    // ----- User-initiated actions (provider first, mirror second) -----

    /// Create or reuse the tenant's provider customer, then open a hosted
    /// checkout session for the given price.
    #[tracing::instrument(skip(self, tenant), fields(tenant_id = %tenant.id))]
    pub async fn start_checkout(
        &self,
        tenant: &Tenant,
        price_id: String,
    ) -> Result<StripeCheckoutSession, AppError> {
        let customer_id = match &tenant.stripe_customer_id {
            Some(id) => {
                self.stripe
                    .retrieve_customer(id)
                    .await
                    .map_err(stripe_err)?
                    .id
            }
            None => {
                let customer = self
                    .stripe
                    .create_customer(&tenant.name, &tenant.id)
                    .await
                    .map_err(stripe_err)?;
                self.tenants
                    .update(
                        &tenant.id,
                        TenantChanges {
                            stripe_customer_id: Some(customer.id.clone()),
                        },
                    )
                    .await?;
                customer.id
            }
        };

        self.stripe
            .create_checkout_session(&CheckoutSessionParams {
                customer_id,
                price_id,
                tenant_id: tenant.id.clone(),
                success_url: format!(
                    "{}/success?session_id={{CHECKOUT_SESSION_ID}}",
                    self.frontend_url
                ),
                cancel_url: format!("{}/cancel", self.frontend_url),
            })
            .await
            .map_err(stripe_err)
    }

    /// Request cancellation at period end.
    #[tracing::instrument(skip(self, subscription), fields(subscription_id = %subscription.id))]
    pub async fn cancel(&self, subscription: &Subscription) -> Result<Subscription, AppError> {
        self.stripe
            .set_cancel_at_period_end(&subscription.stripe_subscription_id, true)
            .await
            .map_err(stripe_err)?;
        self.mirror(
            &subscription.id,
            SubscriptionChanges {
                status: Some(SubscriptionStatus::Canceling),
                cancel_at_period_end: Some(true),
                ..Default::default()
            },
        )
        .await
    }

    /// Undo a pending cancellation.
    #[tracing::instrument(skip(self, subscription), fields(subscription_id = %subscription.id))]
    pub async fn reactivate(&self, subscription: &Subscription) -> Result<Subscription, AppError> {
        self.stripe
            .set_cancel_at_period_end(&subscription.stripe_subscription_id, false)
            .await
            .map_err(stripe_err)?;
        self.mirror(
            &subscription.id,
            SubscriptionChanges {
                status: Some(SubscriptionStatus::Active),
                cancel_at_period_end: Some(false),
                ..Default::default()
            },
        )
        .await
    }

    /// Switch the subscription to a new price with proration. Produces no
    /// distinct webhook, so the local mirror is the only record of the
    /// change until the next period event.
    #[tracing::instrument(skip(self, subscription), fields(subscription_id = %subscription.id))]
    pub async fn change_plan(
        &self,
        subscription: &Subscription,
        new_price_id: String,
    ) -> Result<Subscription, AppError> {
        self.stripe
            .change_subscription_price(
                &subscription.stripe_subscription_id,
                &subscription.stripe_subscription_item_id,
                &new_price_id,
            )
            .await
            .map_err(stripe_err)?;
        self.mirror(
            &subscription.id,
            SubscriptionChanges {
                price_id: Some(new_price_id),
                updated_at: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await
    }

    async fn mirror(
        &self,
        subscription_id: &str,
        changes: SubscriptionChanges,
    ) -> Result<Subscription, AppError> {
        self.subscriptions
            .update(subscription_id, changes)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Subscription {} disappeared while mirroring provider state",
                    subscription_id
                ))
            })
    }
}
