use super::file::FileStore;
use chrono::Utc;
use tenantbill_core::ids::{generate_id, SUBSCRIPTION_PREFIX};
use tenantbill_core::models::{NewSubscription, Subscription, SubscriptionChanges};
use tenantbill_core::AppError;

const COLLECTION: &str = "subscriptions";

/// Repository for subscription records.
#[derive(Clone)]
pub struct SubscriptionRepository {
    store: FileStore,
}

impl SubscriptionRepository {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self), fields(store.collection = COLLECTION, store.operation = "list"))]
    pub async fn list(&self) -> Vec<Subscription> {
        self.store.read_collection(COLLECTION).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = COLLECTION, store.operation = "find", store.record_id = %id))]
    pub async fn find_by_id(&self, id: &str) -> Option<Subscription> {
        self.list().await.into_iter().find(|s| s.id == id)
    }

    /// All subscription records a tenant has accumulated, in creation order.
    #[tracing::instrument(skip(self), fields(store.collection = COLLECTION, store.operation = "find"))]
    pub async fn find_by_tenant_id(&self, tenant_id: &str) -> Vec<Subscription> {
        self.list()
            .await
            .into_iter()
            .filter(|s| s.tenant_id == tenant_id)
            .collect()
    }

    #[tracing::instrument(skip(self), fields(store.collection = COLLECTION, store.operation = "find"))]
    pub async fn find_by_stripe_subscription_id(&self, external_id: &str) -> Option<Subscription> {
        self.list()
            .await
            .into_iter()
            .find(|s| s.stripe_subscription_id == external_id)
    }

    #[tracing::instrument(skip(self, new), fields(store.collection = COLLECTION, store.operation = "create"))]
    pub async fn create(&self, new: NewSubscription) -> Result<Subscription, AppError> {
        let mut subscriptions = self.list().await;
        let subscription = Subscription {
            id: generate_id(SUBSCRIPTION_PREFIX),
            tenant_id: new.tenant_id,
            stripe_subscription_id: new.stripe_subscription_id,
            stripe_subscription_item_id: new.stripe_subscription_item_id,
            price_id: new.price_id,
            status: new.status,
            current_period_start: new.current_period_start,
            current_period_end: new.current_period_end,
            cancel_at_period_end: new.cancel_at_period_end,
            created_at: Utc::now(),
            canceled_at: None,
            updated_at: None,
        };
        subscriptions.push(subscription.clone());
        self.store
            .write_collection(COLLECTION, &subscriptions)
            .await?;
        Ok(subscription)
    }

    /// Apply a partial update. Returns `None` without writing when no
    /// subscription matches the id.
    #[tracing::instrument(skip(self, changes), fields(store.collection = COLLECTION, store.operation = "update", store.record_id = %id))]
    pub async fn update(
        &self,
        id: &str,
        changes: SubscriptionChanges,
    ) -> Result<Option<Subscription>, AppError> {
        let mut subscriptions = self.list().await;
        let Some(subscription) = subscriptions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        subscription.apply(changes);
        let updated = subscription.clone();
        self.store
            .write_collection(COLLECTION, &subscriptions)
            .await?;
        Ok(Some(updated))
    }
}
