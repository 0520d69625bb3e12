use super::file::FileStore;
use chrono::Utc;
use tenantbill_core::ids::{generate_id, TENANT_PREFIX};
use tenantbill_core::models::{Tenant, TenantChanges};
use tenantbill_core::AppError;

const COLLECTION: &str = "tenants";

/// Repository for tenant records.
#[derive(Clone)]
pub struct TenantRepository {
    store: FileStore,
}

impl TenantRepository {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self), fields(store.collection = COLLECTION, store.operation = "list"))]
    pub async fn list(&self) -> Vec<Tenant> {
        self.store.read_collection(COLLECTION).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = COLLECTION, store.operation = "find", store.record_id = %id))]
    pub async fn find_by_id(&self, id: &str) -> Option<Tenant> {
        self.list().await.into_iter().find(|t| t.id == id)
    }

    #[tracing::instrument(skip(self), fields(store.collection = COLLECTION, store.operation = "find"))]
    pub async fn find_by_user_id(&self, user_id: &str) -> Vec<Tenant> {
        self.list()
            .await
            .into_iter()
            .filter(|t| t.user_id == user_id)
            .collect()
    }

    #[tracing::instrument(skip(self), fields(store.collection = COLLECTION, store.operation = "create"))]
    pub async fn create(&self, name: String, user_id: String) -> Result<Tenant, AppError> {
        let mut tenants = self.list().await;
        let tenant = Tenant {
            id: generate_id(TENANT_PREFIX),
            name,
            user_id,
            created_at: Utc::now(),
            stripe_customer_id: None,
        };
        tenants.push(tenant.clone());
        self.store.write_collection(COLLECTION, &tenants).await?;
        Ok(tenant)
    }

    /// Apply a partial update. Returns `None` without writing when no tenant
    /// matches the id.
    #[tracing::instrument(skip(self, changes), fields(store.collection = COLLECTION, store.operation = "update", store.record_id = %id))]
    pub async fn update(
        &self,
        id: &str,
        changes: TenantChanges,
    ) -> Result<Option<Tenant>, AppError> {
        let mut tenants = self.list().await;
        let Some(tenant) = tenants.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        tenant.apply(changes);
        let updated = tenant.clone();
        self.store.write_collection(COLLECTION, &tenants).await?;
        Ok(Some(updated))
    }
}
