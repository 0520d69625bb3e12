use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tenantbill_core::models::{Subscription, Tenant};
use tenantbill_core::AppError;
use utoipa::ToSchema;
use validator::Validate;

/// Current billing state of a tenant: the active subscription when one
/// exists, plus a summary status string ("inactive" when none is active).
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionStatusResponse {
    pub tenant: Tenant,
    pub subscription: Option<Subscription>,
    pub status: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    #[validate(length(min = 1, message = "Price ID required"))]
    pub price_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutResponse {
    pub session_id: String,
    pub url: Option<String>,
}

/// User-initiated subscription action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionAction {
    Cancel,
    Reactivate,
    Upgrade,
    Downgrade,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    pub action: SubscriptionAction,
    #[serde(default)]
    pub new_price_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/tenant/{tenantId}/subscription",
    tag = "subscriptions",
    params(
        ("tenantId" = String, Path, description = "Tenant id")
    ),
    responses(
        (status = 200, description = "Tenant billing state", body = SubscriptionStatusResponse),
        (status = 404, description = "Tenant not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(tenant_id = %tenant_id, operation = "get_subscription"))]
pub async fn get_subscription(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let tenant = state
        .store
        .tenants
        .find_by_id(&tenant_id)
        .await
        .ok_or_else(|| AppError::NotFound("Tenant not found".to_string()))?;

    // A tenant accumulates subscription records over time; at most one
    // should be active, and that one is the tenant's current subscription.
    let subscriptions = state.store.subscriptions.find_by_tenant_id(&tenant.id).await;
    let active = subscriptions.into_iter().find(Subscription::is_active);

    let status = active
        .as_ref()
        .map(|s| s.status.to_string())
        .unwrap_or_else(|| "inactive".to_string());

    Ok(Json(SubscriptionStatusResponse {
        tenant,
        subscription: active,
        status,
    }))
}

#[utoipa::path(
    post,
    path = "/api/tenant/{tenantId}/subscription",
    tag = "subscriptions",
    params(
        ("tenantId" = String, Path, description = "Tenant id")
    ),
    request_body = CreateCheckoutRequest,
    responses(
        (status = 200, description = "Hosted checkout session", body = CreateCheckoutResponse),
        (status = 404, description = "Tenant not found", body = ErrorResponse),
        (status = 500, description = "Provider call failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(tenant_id = %tenant_id, operation = "create_checkout"))]
pub async fn create_checkout(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCheckoutRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let tenant = state
        .store
        .tenants
        .find_by_id(&tenant_id)
        .await
        .ok_or_else(|| AppError::NotFound("Tenant not found".to_string()))?;
    request.validate().map_err(AppError::from)?;

    let session = state
        .billing
        .service
        .start_checkout(&tenant, request.price_id)
        .await?;

    Ok(Json(CreateCheckoutResponse {
        session_id: session.id,
        url: session.url,
    }))
}

#[utoipa::path(
    put,
    path = "/api/tenant/{tenantId}/subscription/{subscriptionId}",
    tag = "subscriptions",
    params(
        ("tenantId" = String, Path, description = "Tenant id"),
        ("subscriptionId" = String, Path, description = "Local subscription id")
    ),
    request_body = UpdateSubscriptionRequest,
    responses(
        (status = 200, description = "Updated subscription", body = Subscription),
        (status = 400, description = "Invalid action or missing price id", body = ErrorResponse),
        (status = 404, description = "Subscription not found for tenant", body = ErrorResponse),
        (status = 500, description = "Provider call failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(tenant_id = %tenant_id, subscription_id = %subscription_id, operation = "update_subscription")
)]
pub async fn update_subscription(
    State(state): State<Arc<AppState>>,
    Path((tenant_id, subscription_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateSubscriptionRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let subscription = state
        .store
        .subscriptions
        .find_by_id(&subscription_id)
        .await
        .filter(|s| s.tenant_id == tenant_id)
        .ok_or_else(|| AppError::NotFound("Subscription not found".to_string()))?;

    let updated = match request.action {
        SubscriptionAction::Cancel => state.billing.service.cancel(&subscription).await?,
        SubscriptionAction::Reactivate => state.billing.service.reactivate(&subscription).await?,
        SubscriptionAction::Upgrade | SubscriptionAction::Downgrade => {
            let new_price_id = request.new_price_id.filter(|p| !p.is_empty()).ok_or_else(|| {
                AppError::BadRequest("New price ID required for upgrade/downgrade".to_string())
            })?;
            state
                .billing
                .service
                .change_plan(&subscription, new_price_id)
                .await?
        }
    };

    Ok(Json(updated))
}
